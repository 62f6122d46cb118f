//! Info command implementation.

use gzhead::{GzipHeader, flags, os_name};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON serializable FEXTRA subfield.
#[derive(Debug, Serialize)]
struct FieldJson {
    ids: String,
    len: usize,
    data: String,
}

/// JSON output for a gzip header.
#[derive(Debug, Serialize)]
struct HeaderJson {
    file: String,
    header_len: usize,
    compression_method: u8,
    flags: u8,
    flag_names: Vec<&'static str>,
    mtime: u32,
    extra_flags: u8,
    os: u8,
    os_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<Vec<FieldJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_crc: Option<u16>,
}

impl HeaderJson {
    fn from_header(file: &Path, header: &GzipHeader) -> Self {
        Self {
            file: file.display().to_string(),
            header_len: header.encoded_len(),
            compression_method: header.compression_method,
            flags: header.flags(),
            flag_names: flag_names(header.flags()),
            mtime: header.modification_time,
            extra_flags: header.extra_flags,
            os: header.operating_system,
            os_name: os_name(header.operating_system),
            extra: header.extra_fields().map(|fields| {
                fields
                    .iter()
                    .map(|f| FieldJson {
                        ids: to_hex(&f.ids()),
                        len: f.data().len(),
                        data: to_hex(f.data()),
                    })
                    .collect()
            }),
            filename: header.filename().map(str::to_string),
            comment: header.comment().map(str::to_string),
            header_crc: header.header_crc(),
        }
    }
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(File::open(file)?);
    let header = GzipHeader::read(&mut reader)?;

    if json {
        let out = HeaderJson::from_header(file, &header);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    print_header(&header);
    Ok(())
}

/// Print a header in human-readable form.
pub fn print_header(header: &GzipHeader) {
    println!();
    println!("GZIP Header:");
    println!("  Header size: {} bytes", header.encoded_len());
    println!("  Compression method: {}", header.compression_method);
    println!(
        "  Flags: {:#04x} [{}]",
        header.flags(),
        flag_names(header.flags()).join(" ")
    );
    if header.modification_time > 0 {
        println!(
            "  Modification time: {} (Unix timestamp)",
            header.modification_time
        );
    } else {
        println!("  Modification time: none");
    }
    println!("  Extra flags: {}", header.extra_flags);
    println!(
        "  Operating system: {} ({})",
        header.operating_system,
        os_name(header.operating_system)
    );

    if let Some(fields) = header.extra_fields() {
        println!("  Extra subfields: {}", fields.len());
        for field in fields {
            let ids = field.ids();
            println!(
                "    {}{} ({} bytes): {}",
                printable(ids[0]),
                printable(ids[1]),
                field.data().len(),
                preview_hex(field.data(), 16)
            );
        }
    }
    if let Some(name) = header.filename() {
        println!("  Original filename: {}", name);
    }
    if let Some(comment) = header.comment() {
        println!("  Comment: {}", comment);
    }
    if let Some(crc) = header.header_crc() {
        println!("  Header CRC: {:#06x} (verified)", crc);
    }
}

fn flag_names(bits: u8) -> Vec<&'static str> {
    let named = [
        (flags::FTEXT, "FTEXT"),
        (flags::FHCRC, "FHCRC"),
        (flags::FEXTRA, "FEXTRA"),
        (flags::FNAME, "FNAME"),
        (flags::FCOMMENT, "FCOMMENT"),
    ];
    let mut names: Vec<&'static str> = named
        .iter()
        .filter(|(bit, _)| bits & bit != 0)
        .map(|&(_, name)| name)
        .collect();
    if bits & 0xE0 != 0 {
        names.push("RESERVED");
    }
    names
}

fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

fn preview_hex(data: &[u8], max: usize) -> String {
    if data.len() > max {
        format!("{}...", to_hex(&data[..max]))
    } else {
        to_hex(data)
    }
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() {
        byte as char
    } else {
        '.'
    }
}
