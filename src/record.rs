//! Medical-image records: DICOM Part 10 files.
//!
//! Only the patient-name attribute is touched. Everything else in the data
//! set, including pixel data, is written back as read.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_dictionary_std::tags;
use dicom_object::{open_file, DefaultDicomObject};

use crate::error::Result;

const PREAMBLE_LEN: usize = 128;
const MAGIC: &[u8; 4] = b"DICM";

/// Result of attempting to read a file as a record.
#[derive(Debug)]
pub enum ParseOutcome {
    Parsed(Box<DefaultDicomObject>),
    NotThisFormat,
}

/// True when the file starts with a 128-byte preamble followed by `DICM`.
pub fn has_record_magic(path: &Path) -> io::Result<bool> {
    let mut header = Vec::with_capacity(PREAMBLE_LEN + MAGIC.len());
    File::open(path)?
        .take((PREAMBLE_LEN + MAGIC.len()) as u64)
        .read_to_end(&mut header)?;
    Ok(header.len() == PREAMBLE_LEN + MAGIC.len() && &header[PREAMBLE_LEN..] == MAGIC)
}

/// Reads `path` as a record. Files without the Part 10 header are
/// `NotThisFormat`; a file that has the header but does not parse is an error.
pub fn read_record(path: &Path) -> Result<ParseOutcome> {
    if !has_record_magic(path)? {
        return Ok(ParseOutcome::NotThisFormat);
    }
    let obj = open_file(path)?;
    Ok(ParseOutcome::Parsed(Box::new(obj)))
}

pub fn set_patient_name(obj: &mut DefaultDicomObject, patient_label: &str) {
    obj.put(DataElement::new(
        tags::PATIENT_NAME,
        VR::PN,
        PrimitiveValue::from(patient_label),
    ));
}

pub fn write_record(obj: &DefaultDicomObject, destination: &Path) -> Result<()> {
    obj.write_to_file(destination)?;
    Ok(())
}
