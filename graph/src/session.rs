//! Binary encode and decode sessions sharing reference and string tables.
//!
//! A session owns its tables for exactly one call. Dropping it (on success or on any error path)
//! releases everything it tracked.
//!
//! Wire conventions:
//! - `Null` tag for an absent string or object
//! - `String` tag plus a length-prefixed payload for the first occurrence of a string, which the
//!   decoder registers under the next intern id
//! - `InternedString` tag plus a var-int id for repeats
//! - `Object` tag for the first occurrence of an object, whose fields follow and which the decoder
//!   registers under the next reference id
//! - `Reference` tag plus a var-int id for repeats

use crate::{
    Error, Identity, InternConfig, InternTable, ReferenceReader, ReferenceWriter, TrackerConfig,
};
use bytes::Bytes;
use std::sync::Arc;
use tessera_codec::{Decoder, Encoder, TypeCode};

/// Encodes values that may share strings and objects.
#[derive(Debug, Default)]
pub struct WriteSession {
    encoder: Encoder,
    references: ReferenceWriter,
    strings: InternTable,
}

impl WriteSession {
    pub fn new(tracker: TrackerConfig, intern: InternConfig) -> Self {
        Self {
            encoder: Encoder::new(),
            references: ReferenceWriter::new(tracker),
            strings: InternTable::new(intern),
        }
    }

    /// Encoder for writing object fields.
    pub fn encoder(&mut self) -> &mut Encoder {
        &mut self.encoder
    }

    pub fn references(&self) -> &ReferenceWriter {
        &self.references
    }

    pub fn strings(&self) -> &InternTable {
        &self.strings
    }

    /// Writes the `Null` marker.
    pub fn write_null(&mut self) {
        self.encoder.write_null();
    }

    /// Writes a string, replacing repeats with their intern id.
    pub fn write_string(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            self.encoder.write_null();
            return;
        };
        match self.strings.try_intern(value) {
            Some((id, false)) => self.encoder.write_interned(id),
            // New or not interned: the decoder mirrors the same choice from its own table.
            Some((_, true)) | None => {
                self.encoder.write_type_code(TypeCode::String);
                self.encoder.write_str(Some(value));
            }
        }
    }

    /// Starts writing `obj`.
    ///
    /// Returns `true` if this is the first occurrence and the caller must now write its fields,
    /// or `false` if a back-reference was written instead.
    pub fn begin_object<I: Identity + ?Sized>(&mut self, obj: &I) -> Result<bool, Error> {
        let (id, new) = self.references.try_track(obj)?;
        if new {
            self.encoder.write_type_code(TypeCode::Object);
        } else {
            self.encoder.write_reference(id);
        }
        Ok(new)
    }

    /// Resets the session for another call, keeping allocations.
    pub fn clear(&mut self) {
        self.encoder.clear();
        self.references.clear();
        self.strings.clear();
    }

    /// Returns the encoded bytes.
    pub fn finish(self) -> Bytes {
        self.encoder.freeze()
    }
}

/// How an object starts in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectStart<T> {
    Null,
    /// A back-reference to an object already registered.
    Existing(T),
    /// A first occurrence. The caller constructs the object, registers it under this id, then
    /// reads its fields.
    New(u32),
}

/// Decodes values written by a [WriteSession].
#[derive(Debug)]
pub struct ReadSession<'a, T> {
    decoder: Decoder<'a>,
    references: ReferenceReader<T>,
    strings: InternTable,
}

impl<'a, T: Clone> ReadSession<'a, T> {
    pub fn new(data: &'a [u8], tracker: TrackerConfig, intern: InternConfig) -> Self {
        Self {
            decoder: Decoder::new(data),
            references: ReferenceReader::new(tracker),
            strings: InternTable::new(intern),
        }
    }

    /// Decoder for reading object fields.
    pub fn decoder(&mut self) -> &mut Decoder<'a> {
        &mut self.decoder
    }

    pub fn references(&self) -> &ReferenceReader<T> {
        &self.references
    }

    /// Reads a string written by [WriteSession::write_string].
    pub fn read_string(&mut self) -> Result<Option<Arc<str>>, Error> {
        let position = self.decoder.position();
        match self.decoder.read_type_code()? {
            TypeCode::Null => Ok(None),
            TypeCode::String => {
                let value = self.decoder.read_str()?.ok_or(tessera_codec::Error::InvalidFormat {
                    position,
                    reason: "null string payload",
                })?;
                let id = self.strings.next_id();
                if self.strings.register(id, value) {
                    Ok(self.strings.get_shared(id))
                } else {
                    Ok(Some(Arc::from(value)))
                }
            }
            TypeCode::InternedString => {
                let id = self.decoder.read_var_u32()?;
                self.strings
                    .get_shared(id)
                    .map(Some)
                    .ok_or(Error::UnknownReference(id))
            }
            other => Err(tessera_codec::Error::UnknownType {
                code: other.into(),
                position,
            }
            .into()),
        }
    }

    /// Reads the start of an object written by [WriteSession::begin_object].
    pub fn begin_object(&mut self) -> Result<ObjectStart<T>, Error> {
        let position = self.decoder.position();
        match self.decoder.read_type_code()? {
            TypeCode::Null => Ok(ObjectStart::Null),
            TypeCode::Object => Ok(ObjectStart::New(self.references.reserve_id()?)),
            TypeCode::Reference => {
                let id = self.decoder.read_var_u32()?;
                self.references.resolve(id).cloned().map(ObjectStart::Existing)
            }
            other => Err(tessera_codec::Error::UnknownType {
                code: other.into(),
                position,
            }
            .into()),
        }
    }

    /// Registers a (possibly incomplete) object under an id returned by [Self::begin_object].
    pub fn register(&mut self, id: u32, obj: T) -> Result<(), Error> {
        self.references.register(id, obj)
    }

    /// Ends the session, failing if input remains.
    pub fn finish(self) -> Result<(), Error> {
        let remaining = self.decoder.remaining();
        if remaining > 0 {
            return Err(tessera_codec::Error::ExtraData(remaining).into());
        }
        Ok(())
    }
}
