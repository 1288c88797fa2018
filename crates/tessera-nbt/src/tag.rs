use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(HashMap<String, Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn get_type_id(&self) -> u8 {
        match self {
            Tag::End => 0,
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 3,
            Tag::Long(_) => 4,
            Tag::Float(_) => 5,
            Tag::Double(_) => 6,
            Tag::ByteArray(_) => 7,
            Tag::String(_) => 8,
            Tag::List(_) => 9,
            Tag::Compound(_) => 10,
            Tag::IntArray(_) => 11,
            Tag::LongArray(_) => 12,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Tag::End => "TAG_End",
            Tag::Byte(_) => "TAG_Byte",
            Tag::Short(_) => "TAG_Short",
            Tag::Int(_) => "TAG_Int",
            Tag::Long(_) => "TAG_Long",
            Tag::Float(_) => "TAG_Float",
            Tag::Double(_) => "TAG_Double",
            Tag::ByteArray(_) => "TAG_Byte_Array",
            Tag::String(_) => "TAG_String",
            Tag::List(_) => "TAG_List",
            Tag::Compound(_) => "TAG_Compound",
            Tag::IntArray(_) => "TAG_Int_Array",
            Tag::LongArray(_) => "TAG_Long_Array",
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Tag::End)
    }

    /// Builds a compound from `(name, tag)` pairs.
    pub fn compound<K, I>(entries: I) -> Tag
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Tag)>,
    {
        Tag::Compound(
            entries
                .into_iter()
                .map(|(name, tag)| (name.into(), tag))
                .collect(),
        )
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Tag>> {
        match self {
            Tag::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Tag::Short(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Tag::Byte(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Tag::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Tag::Float(n) => Some(*n),
            _ => None,
        }
    }

    fn fmt_payload(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Tag::End => Ok(()),
            Tag::Byte(v) => write!(f, "{}", v),
            Tag::Short(v) => write!(f, "{}", v),
            Tag::Int(v) => write!(f, "{}", v),
            Tag::Long(v) => write!(f, "{}", v),
            Tag::Float(v) => write!(f, "{}", v),
            Tag::Double(v) => write!(f, "{}", v),
            Tag::ByteArray(v) => write!(f, "[{} bytes]", v.len()),
            Tag::String(v) => write!(f, "{:?}", v),
            Tag::IntArray(v) => write!(f, "[{} ints]", v.len()),
            Tag::LongArray(v) => write!(f, "[{} longs]", v.len()),
            Tag::List(list) => {
                writeln!(f, "{} entries {{", list.len())?;
                for tag in list {
                    write!(f, "{}{}(None): ", indent(depth + 1), tag.type_name())?;
                    tag.fmt_payload(f, depth + 1)?;
                    writeln!(f)?;
                }
                write!(f, "{}}}", indent(depth))
            }
            Tag::Compound(map) => {
                writeln!(f, "{} entries {{", map.len())?;
                let mut names: Vec<&String> = map.keys().collect();
                names.sort();
                for name in names {
                    let tag = &map[name];
                    write!(f, "{}{}('{}'): ", indent(depth + 1), tag.type_name(), name)?;
                    tag.fmt_payload(f, depth + 1)?;
                    writeln!(f)?;
                }
                write!(f, "{}}}", indent(depth))
            }
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(None): ", self.type_name())?;
        self.fmt_payload(f, 0)
    }
}

/// A tag together with its name, as it appears inside a compound or a
/// flattened metadata list.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    name: String,
    tag: Tag,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, tag: Tag) -> Self {
        NamedTag {
            name: name.into(),
            tag,
        }
    }

    /// The end-of-list marker.
    pub fn end() -> Self {
        NamedTag::new("", Tag::End)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn tag_id(&self) -> u8 {
        self.tag.get_type_id()
    }

    pub fn is_end(&self) -> bool {
        self.tag.is_end()
    }

    pub fn into_parts(self) -> (String, Tag) {
        (self.name, self.tag)
    }
}

impl fmt::Display for NamedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}'): ", self.tag.type_name(), self.name)?;
        self.tag.fmt_payload(f, 0)
    }
}

impl From<(String, Tag)> for NamedTag {
    fn from((name, tag): (String, Tag)) -> Self {
        NamedTag { name, tag }
    }
}
