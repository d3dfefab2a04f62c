//! Rendering of query results as JSON or XML text.

use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Serializer, Value};

use crate::decode::{DataVersion, InfoData, Record};
use crate::error::InfoError;
use crate::filter::predicate::attribute_text;
use crate::info_type::{InfoType, ResultFormat};

/// Attribute carrying the version scalar in XML output.
const VERSION_ATTRIBUTE: &str = "current_version";

/// Render `data` under a root named after `info_type`.
pub fn format_result(
    data: &InfoData,
    info_type: InfoType,
    format: ResultFormat,
) -> Result<String, InfoError> {
    match (format, data) {
        (ResultFormat::Json, InfoData::Records(records)) => {
            let records = records.iter().map(|r| sort_keys(&Value::Object(r.clone())));
            to_json(info_type, Value::Array(records.collect()))
        }
        (ResultFormat::Json, InfoData::Version(version)) => {
            to_json(info_type, serde_json::to_value(version)?)
        }
        (ResultFormat::Xml, InfoData::Records(records)) => records_to_xml(info_type, records),
        (ResultFormat::Xml, InfoData::Version(version)) => version_to_xml(info_type, version),
    }
}

/// `{"<info_type>": value}` with 2-space indentation and ASCII-only text.
fn to_json(info_type: InfoType, value: Value) -> Result<String, InfoError> {
    let mut document = Map::new();
    document.insert(info_type.as_str().to_string(), value);

    let mut serializer = Serializer::with_formatter(Vec::new(), AsciiFormatter::new());
    document.serialize(&mut serializer)?;
    String::from_utf8(serializer.into_inner()).map_err(|_| InfoError::Utf8)
}

/// Copy of `value` with every object's keys in sorted order.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Pretty printer that writes non-ASCII characters as `\uXXXX` escapes,
/// one per UTF-16 code unit.
struct AsciiFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl AsciiFormatter<'_> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut rest = fragment;
        while let Some(pos) = rest.find(|c: char| !c.is_ascii()) {
            writer.write_all(rest[..pos].as_bytes())?;
            let c = rest[pos..].chars().next().unwrap_or_default();
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            rest = &rest[pos + c.len_utf8()..];
        }
        writer.write_all(rest.as_bytes())
    }
}

fn records_to_xml(info_type: InfoType, records: &[Record]) -> Result<String, InfoError> {
    let root = info_type.as_str();
    let child = info_type.singular().unwrap_or(root);

    let mut writer = xml_writer()?;
    if records.is_empty() {
        write(&mut writer, Event::Empty(BytesStart::new(root)))?;
    } else {
        write(&mut writer, Event::Start(BytesStart::new(root)))?;
        for record in records {
            let attributes: Vec<(&str, String)> = record
                .iter()
                .map(|(name, value)| (name.as_str(), attribute_text(value)))
                .collect();
            let element = BytesStart::new(child)
                .with_attributes(attributes.iter().map(|(name, value)| (*name, value.as_str())));
            write(&mut writer, Event::Empty(element))?;
        }
        write(&mut writer, Event::End(BytesEnd::new(root)))?;
    }
    finish(writer)
}

fn version_to_xml(info_type: InfoType, version: &DataVersion) -> Result<String, InfoError> {
    let version = version.to_string();
    let mut writer = xml_writer()?;
    let element = BytesStart::new(info_type.as_str())
        .with_attributes([(VERSION_ATTRIBUTE, version.as_str())]);
    write(&mut writer, Event::Empty(element))?;
    finish(writer)
}

fn xml_writer() -> Result<Writer<Vec<u8>>, InfoError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    Ok(writer)
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), InfoError> {
    writer
        .write_event(event)
        .map_err(|e| InfoError::Xml(e.to_string()))
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, InfoError> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|_| InfoError::Utf8)
}
