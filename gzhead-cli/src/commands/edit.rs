//! Edit command implementation.

use super::info::print_header;
use gzhead::GzipHeader;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Header changes requested on the command line.
///
/// For the text fields, `Some(Some(v))` sets a value, `Some(None)` removes it
/// and `None` keeps what the input has.
#[derive(Debug, Default)]
pub struct EditOptions {
    pub name: Option<Option<String>>,
    pub comment: Option<Option<String>>,
    pub mtime: Option<u32>,
    pub touch: bool,
    pub os: Option<u8>,
    pub hcrc: Option<bool>,
    pub strip_extra: bool,
    pub verbose: bool,
}

/// Apply the requested changes through the header's setters.
pub fn apply_edits(header: &mut GzipHeader, options: &EditOptions) -> gzhead::Result<()> {
    if let Some(name) = &options.name {
        header.set_filename(name.clone())?;
    }
    if let Some(comment) = &options.comment {
        header.set_comment(comment.clone())?;
    }
    if options.strip_extra {
        header.set_extra_fields(None)?;
    }
    if let Some(mtime) = options.mtime {
        header.modification_time = mtime;
    }
    if options.touch {
        *header = std::mem::take(header).with_mtime_now();
    }
    if let Some(os) = options.os {
        header.operating_system = os;
    }
    if let Some(hcrc) = options.hcrc {
        header.set_checksum_flag(hcrc);
    }
    Ok(())
}

pub fn cmd_edit(
    input: &Path,
    output: &Path,
    options: &EditOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && fs::canonicalize(input)? == fs::canonicalize(output)? {
        return Err("output must not be the input file".into());
    }

    let mut reader = BufReader::new(File::open(input)?);
    let mut header = GzipHeader::read(&mut reader)?;
    let old_len = header.encoded_len();

    apply_edits(&mut header, options)?;

    let mut writer = BufWriter::new(File::create(output)?);
    header.write(&mut writer)?;
    let payload = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    println!(
        "Wrote {}: header {} -> {} bytes, {} payload bytes copied",
        output.display(),
        old_len,
        header.encoded_len(),
        payload
    );
    if options.verbose {
        print_header(&header);
    }

    Ok(())
}
