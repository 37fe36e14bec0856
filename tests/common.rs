#![cfg(feature = "std")]

mod support;

use std::{collections::VecDeque, path::Path};

use csv::ReaderBuilder;
use tre_codec::{
    avec::{FromTre, FromTres, publish, slice},
    sans::field::Field,
};

#[test]
fn decode_slice_sensra() {
    const PATH: &str = "fixtures/sensra.tre";
    let data = std::fs::read(PATH).unwrap();
    let extension = tre_codec::avec::decode_slice(&support::registry(), "SENSRA", &data).unwrap();
    let mut validator = Validator::new(PATH);
    publish([extension.tre()], &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_ptlist() {
    const PATH: &str = "fixtures/ptlist.tre";
    let data = std::fs::read(PATH).unwrap();
    let extension = tre_codec::avec::decode_slice(&support::registry(), "PTLIST", &data).unwrap();
    let mut validator = Validator::new(PATH);
    publish([extension.tre()], &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_modext_with_extra() {
    const PATH: &str = "fixtures/modext-b.tre";
    let data = std::fs::read(PATH).unwrap();
    let extension = tre_codec::avec::decode_slice(&support::registry(), "MODEXT", &data).unwrap();
    let mut validator = Validator::new(PATH);
    publish([extension.tre()], &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_modext_without_extra() {
    const PATH: &str = "fixtures/modext-a.tre";
    let data = std::fs::read(PATH).unwrap();
    let extension = tre_codec::avec::decode_slice(&support::registry(), "MODEXT", &data).unwrap();
    let mut validator = Validator::new(PATH);
    publish([extension.tre()], &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_gridxa() {
    const PATH: &str = "fixtures/gridxa.tre";
    let data = std::fs::read(PATH).unwrap();
    let extension = tre_codec::avec::decode_slice(&support::registry(), "GRIDXA", &data).unwrap();
    let mut validator = Validator::new(PATH);
    publish([extension.tre()], &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_sensra() {
    const PATH: &str = "fixtures/sensra.tre";
    let length = std::fs::metadata(PATH).unwrap().len() as usize;
    let mut file = std::fs::File::open(PATH).unwrap();
    let extension =
        tre_codec::avec::decode_reader(&support::registry(), "SENSRA", length, &mut file).unwrap();
    let mut validator = Validator::new(PATH);
    publish([extension.tre()], &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_ptlist() {
    const PATH: &str = "fixtures/ptlist.tre";
    let length = std::fs::metadata(PATH).unwrap().len() as usize;
    let mut file = std::fs::File::open(PATH).unwrap();
    let extension =
        tre_codec::avec::decode_reader(&support::registry(), "PTLIST", length, &mut file).unwrap();
    let mut validator = Validator::new(PATH);
    publish([extension.tre()], &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_truncated() {
    const PATH: &str = "fixtures/sensra.tre";
    let mut file = std::fs::File::open(PATH).unwrap();
    let err = tre_codec::avec::decode_reader(&support::registry(), "SENSRA", 40, &mut file)
        .unwrap_err();
    assert_eq!(err.kind(), tre_codec::ErrorKind::Io);
}

#[test]
fn encode_reproduces_fixtures() {
    for (tag, path) in [
        ("SENSRA", "fixtures/sensra.tre"),
        ("PTLIST", "fixtures/ptlist.tre"),
        ("MODEXT", "fixtures/modext-b.tre"),
        ("MODEXT", "fixtures/modext-a.tre"),
        ("GRIDXA", "fixtures/gridxa.tre"),
    ] {
        let data = std::fs::read(path).unwrap();
        let extension = tre_codec::avec::decode_slice(&support::registry(), tag, &data).unwrap();
        assert!(extension.is_sane(), "{path}");
        assert_eq!(extension.current_size().unwrap(), data.len(), "{path}");
        assert_eq!(slice::encode(&extension).unwrap(), data, "{path}");

        let mut w: Vec<u8> = Vec::new();
        tre_codec::avec::reader::encode(&extension, &mut w).unwrap();
        assert_eq!(w, data, "{path}");
    }
}

/// Checks published subfields against the `tag,value` rows of the fixture's
/// csv companion, where values are displayed without trailing blanks.
struct Validator(VecDeque<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn finish(&self) {
        assert!(self.0.is_empty(), "unpublished rows: {:?}", self.0);
    }
}

impl FromTres for Validator {
    fn add_tre(&mut self, _tag: &str) -> Option<&mut dyn FromTre> {
        Some(self)
    }
}

impl FromTre for Validator {
    fn add_field(&mut self, tag: &str, field: &Field) {
        let row = self.0.pop_front().unwrap();
        assert_eq!(row[0], tag);
        assert_eq!(row[1], field.to_string().trim_end());
    }
}
