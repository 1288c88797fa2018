use crate::tag::Tag;
use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};
use std::collections::HashMap;
use std::io::{self, Read, Write};

/// Deepest list/compound nesting accepted when reading.
pub const MAX_DEPTH: usize = 512;

// Upper bound on what a declared length may reserve before the data arrives.
const PREALLOC_BYTES: usize = 64 * 1024;
const PREALLOC_ELEMENTS: usize = 1024;

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

fn read_length<R: Read>(reader: &mut R) -> io::Result<usize> {
    let length = reader.read_i32::<BigEndian>()?;
    usize::try_from(length).map_err(|_| invalid_data(format!("Negative length: {}", length)))
}

fn nest(depth: usize) -> io::Result<usize> {
    if depth >= MAX_DEPTH {
        return Err(invalid_data(format!("Nesting deeper than {}", MAX_DEPTH)));
    }
    Ok(depth + 1)
}

/// Reads `length` elements of `width` bytes, growing the buffer only as data arrives.
fn read_array_bytes<R: Read>(reader: &mut R, length: usize, width: usize) -> io::Result<Vec<u8>> {
    let wanted = length
        .checked_mul(width)
        .ok_or_else(|| invalid_data(format!("Array of {} elements is too large", length)))?;
    let mut bytes = Vec::with_capacity(wanted.min(PREALLOC_BYTES));
    reader.by_ref().take(wanted as u64).read_to_end(&mut bytes)?;
    if bytes.len() != wanted {
        return Err(invalid_data(format!(
            "Array declares {} bytes, only {} present",
            wanted,
            bytes.len()
        )));
    }
    Ok(bytes)
}

fn read_name<R: Read>(reader: &mut R) -> io::Result<String> {
    let length = reader.read_u16::<BigEndian>()?;
    let mut bytes = vec![0u8; length as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_name<W: Write>(writer: &mut W, name: &str) -> io::Result<()> {
    let length = u16::try_from(name.len())
        .map_err(|_| invalid_data(format!("String too long: {} bytes", name.len())))?;
    writer.write_u16::<BigEndian>(length)?;
    writer.write_all(name.as_bytes())
}

fn write_length<W: Write>(writer: &mut W, length: usize) -> io::Result<()> {
    let length = i32::try_from(length)
        .map_err(|_| invalid_data(format!("Array too long: {} elements", length)))?;
    writer.write_i32::<BigEndian>(length)
}

impl Tag {
    /// Reads one named tag. A bare `TAG_End` yields an empty name.
    pub fn read<R: Read>(reader: &mut R) -> io::Result<(String, Tag)> {
        Tag::read_named(reader, 0)
    }

    fn read_named<R: Read>(reader: &mut R, depth: usize) -> io::Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        if type_id == 0 {
            return Ok((String::new(), Tag::End));
        }
        let name = read_name(reader)?;
        let tag = Tag::read_payload(reader, type_id, depth)?;
        Ok((name, tag))
    }

    pub(crate) fn read_payload<R: Read>(
        reader: &mut R,
        type_id: u8,
        depth: usize,
    ) -> io::Result<Tag> {
        match type_id {
            0 => Ok(Tag::End),
            1 => Ok(Tag::Byte(reader.read_i8()?)),
            2 => Ok(Tag::Short(reader.read_i16::<BigEndian>()?)),
            3 => Ok(Tag::Int(reader.read_i32::<BigEndian>()?)),
            4 => Ok(Tag::Long(reader.read_i64::<BigEndian>()?)),
            5 => Ok(Tag::Float(reader.read_f32::<BigEndian>()?)),
            6 => Ok(Tag::Double(reader.read_f64::<BigEndian>()?)),
            7 => {
                let length = read_length(reader)?;
                let bytes = read_array_bytes(reader, length, 1)?;
                Ok(Tag::ByteArray(bytes.into_iter().map(|b| b as i8).collect()))
            }
            8 => read_name(reader).map(Tag::String),
            9 => {
                let depth = nest(depth)?;
                let list_type = reader.read_u8()?;
                let length = read_length(reader)?;
                if list_type == 0 && length > 0 {
                    return Err(invalid_data(format!(
                        "List of {} elements has no element type",
                        length
                    )));
                }
                let mut list = Vec::with_capacity(length.min(PREALLOC_ELEMENTS));
                for _ in 0..length {
                    list.push(Tag::read_payload(reader, list_type, depth)?);
                }
                Ok(Tag::List(list))
            }
            10 => {
                let depth = nest(depth)?;
                let mut compound = HashMap::new();
                loop {
                    match Tag::read_named(reader, depth)? {
                        (_, Tag::End) => break,
                        (name, tag) => {
                            compound.insert(name, tag);
                        }
                    }
                }
                Ok(Tag::Compound(compound))
            }
            11 => {
                let length = read_length(reader)?;
                let bytes = read_array_bytes(reader, length, 4)?;
                let mut ints = vec![0i32; length];
                BigEndian::read_i32_into(&bytes, &mut ints);
                Ok(Tag::IntArray(ints))
            }
            12 => {
                let length = read_length(reader)?;
                let bytes = read_array_bytes(reader, length, 8)?;
                let mut longs = vec![0i64; length];
                BigEndian::read_i64_into(&bytes, &mut longs);
                Ok(Tag::LongArray(longs))
            }
            _ => Err(invalid_data(format!("Invalid tag type: {}", type_id))),
        }
    }

    pub fn write<W: Write>(&self, writer: &mut W, name: &str) -> io::Result<()> {
        writer.write_u8(self.get_type_id())?;
        if !self.is_end() {
            write_name(writer, name)?;
        }
        self.write_payload(writer)
    }

    fn write_payload<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Tag::End => Ok(()),
            Tag::Byte(v) => writer.write_i8(*v),
            Tag::Short(v) => writer.write_i16::<BigEndian>(*v),
            Tag::Int(v) => writer.write_i32::<BigEndian>(*v),
            Tag::Long(v) => writer.write_i64::<BigEndian>(*v),
            Tag::Float(v) => writer.write_f32::<BigEndian>(*v),
            Tag::Double(v) => writer.write_f64::<BigEndian>(*v),
            Tag::ByteArray(v) => {
                write_length(writer, v.len())?;
                let bytes: Vec<u8> = v.iter().map(|&b| b as u8).collect();
                writer.write_all(&bytes)
            }
            Tag::String(v) => write_name(writer, v),
            Tag::List(v) => {
                let element_type = v.first().map_or(0, Tag::get_type_id);
                if let Some(other) = v.iter().find(|t| t.get_type_id() != element_type) {
                    return Err(invalid_data(format!(
                        "Mixed list: {} among {}",
                        other.type_name(),
                        v[0].type_name()
                    )));
                }
                writer.write_u8(element_type)?;
                write_length(writer, v.len())?;
                v.iter().try_for_each(|tag| tag.write_payload(writer))
            }
            Tag::Compound(v) => {
                // Sorted so the same compound always encodes to the same bytes.
                let mut names: Vec<&String> = v.keys().collect();
                names.sort();
                for name in names {
                    v[name].write(writer, name)?;
                }
                writer.write_u8(0)
            }
            Tag::IntArray(v) => {
                write_length(writer, v.len())?;
                v.iter().try_for_each(|&i| writer.write_i32::<BigEndian>(i))
            }
            Tag::LongArray(v) => {
                write_length(writer, v.len())?;
                v.iter().try_for_each(|&l| writer.write_i64::<BigEndian>(l))
            }
        }
    }
}
