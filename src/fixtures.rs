//! Builders for throwaway archives and catalogs used by the unit tests.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

fn plist_dictionary(pairs: &[(&str, &str)]) -> plist::Value {
    let mut dict = plist::Dictionary::new();
    for (key, value) in pairs {
        dict.insert(key.to_string(), plist::Value::String(value.to_string()));
    }
    plist::Value::Dictionary(dict)
}

pub fn xml_plist(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    plist_dictionary(pairs)
        .to_writer_xml(&mut buf)
        .expect("write xml plist");
    buf
}

pub fn binary_plist(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    plist_dictionary(pairs)
        .to_writer_binary(&mut buf)
        .expect("write binary plist");
    buf
}

pub fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create archive");
    let mut zip = zip::ZipWriter::new(file);
    for (name, bytes) in members {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file(*name, options).expect("start member");
        zip.write_all(bytes).expect("write member");
    }
    zip.finish().expect("finish archive");
}

/// Writes a minimal app archive whose Info.plist carries the given bundle keys.
pub fn write_ipa(path: &Path, bundle_id: &str, version: &str, name: &str, display_name: &str) {
    let plist = xml_plist(&[
        ("CFBundleIdentifier", bundle_id),
        ("CFBundleShortVersionString", version),
        ("CFBundleName", name),
        ("CFBundleDisplayName", display_name),
    ]);
    write_zip(
        path,
        &[
            ("Payload/App.app/App", &b"\xcf\xfa\xed\xfe"[..]),
            ("Payload/App.app/Info.plist", plist.as_slice()),
        ],
    );
}

pub fn write_catalog(path: &Path, json: &str) {
    fs::write(path, json).expect("write catalog");
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(path).expect("read json");
    serde_json::from_str(&raw).expect("parse json")
}
