#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_dictionary_std::{tags, uids};
use dicom_object::{open_file, FileMetaTableBuilder, InMemDicomObject};
use disc_intake::{CopyProgress, FileOutcome, ProgressSink};

pub const PIXELS: [u8; 16] = [
    0x00, 0x01, 0x7f, 0x80, 0xfe, 0xff, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x90, 0xa0,
];

/// Writes a small Secondary Capture record with the given patient name.
pub fn write_record(path: &Path, patient_name: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let sop_instance_uid = "2.25.302914187364509182739451";
    let obj = InMemDicomObject::from_element_iter([
        DataElement::new(
            tags::SOP_CLASS_UID,
            VR::UI,
            PrimitiveValue::from(uids::SECONDARY_CAPTURE_IMAGE_STORAGE),
        ),
        DataElement::new(
            tags::SOP_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(sop_instance_uid),
        ),
        DataElement::new(tags::PATIENT_NAME, VR::PN, PrimitiveValue::from(patient_name)),
        DataElement::new(tags::PATIENT_ID, VR::LO, PrimitiveValue::from("MRN-0042")),
        DataElement::new(
            tags::STUDY_DESCRIPTION,
            VR::LO,
            PrimitiveValue::from("BRAIN MRI W/O"),
        ),
        DataElement::new(tags::PIXEL_DATA, VR::OB, PrimitiveValue::from(PIXELS.to_vec())),
    ]);
    let file = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
                .media_storage_sop_instance_uid(sop_instance_uid),
        )
        .unwrap();
    file.write_to_file(path).unwrap();
}

/// Writes a file with a valid Part 10 header and an unparseable body.
pub fn write_broken_record(path: &Path) {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x01]);
    fs::write(path, bytes).unwrap();
}

pub fn text_attr(path: &Path, tag: dicom_core::Tag) -> String {
    let obj = open_file(path).unwrap();
    let value = obj.element(tag).unwrap().to_str().unwrap();
    value.trim_end().to_string()
}

pub fn patient_name(path: &Path) -> String {
    text_attr(path, tags::PATIENT_NAME)
}

pub fn pixel_bytes(path: &Path) -> Vec<u8> {
    let obj = open_file(path).unwrap();
    let bytes = obj.element(tags::PIXEL_DATA).unwrap().to_bytes().unwrap();
    bytes.to_vec()
}

/// Every path under `root`, relative to it, sorted. Directories end in `/`.
pub fn tree(root: &Path) -> Vec<String> {
    let mut entries = Vec::new();
    collect(root, root, &mut entries);
    entries.sort();
    entries
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let relative = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
        if path.is_dir() {
            out.push(format!("{}/", relative));
            collect(root, &path, out);
        } else {
            out.push(relative);
        }
    }
}

/// Records every sink callback.
#[derive(Default)]
pub struct RecordingSink {
    pub started: Mutex<Vec<usize>>,
    pub files: Mutex<Vec<(PathBuf, FileOutcome)>>,
    pub completed: Mutex<Vec<CopyProgress>>,
}

impl RecordingSink {
    pub fn ticks(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl ProgressSink for RecordingSink {
    fn on_copy_start(&self, total_files: usize) {
        self.started.lock().unwrap().push(total_files);
    }

    fn on_file(&self, path: &Path, outcome: FileOutcome) {
        self.files.lock().unwrap().push((path.to_path_buf(), outcome));
    }

    fn on_copy_complete(&self, progress: &CopyProgress) {
        self.completed.lock().unwrap().push(*progress);
    }
}
