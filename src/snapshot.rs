// snapshot.rs - Decode CBOR snapshot documents into typed patch records
//
// The producing simulation serializes its solution state with ciborium;
// this is the read side. Records are typed so a malformed document fails
// with a named cause instead of rendering garbage.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{path}: not a valid snapshot: {source}")]
    Decode {
        path: String,
        source: ciborium::de::Error<std::io::Error>,
    },

    #[error("patch {index}: axis {axis} range {start}..{end} is inverted")]
    InvertedRange {
        index: usize,
        axis: usize,
        start: i64,
        end: i64,
    },

    #[error("patch {index}: num_fields must be positive")]
    NoFields { index: usize },

    #[error("patch {index}: {len} values cannot fill a {ni}x{nj}x{num_fields} array")]
    ShapeMismatch {
        index: usize,
        len: usize,
        ni: usize,
        nj: usize,
        num_fields: usize,
    },
}

/// Index range along one spatial axis. `end - start` is the cell count;
/// the mesh covers grid points `start..=end`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AxisRange {
    pub start: i64,
    pub end: i64,
}

/// One rectangular sub-grid of cell data, as stored on disk. `data` is
/// flat, row-major over (i, j, field).
#[derive(Debug, Clone, Deserialize)]
pub struct PatchRecord {
    pub rect: [AxisRange; 2],
    pub data: Vec<f64>,
    pub num_fields: usize,
}

/// A decoded snapshot document. The producer stores more keys (`time`,
/// `iteration`, per-patch `level`); only the patch list matters here and
/// the rest are ignored.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    pub primitive: Vec<PatchRecord>,
}

impl Snapshot {
    /// Decode one snapshot document from a file. The handle is dropped as
    /// soon as decoding completes.
    pub fn load(path: &Path) -> Result<Snapshot> {
        let shown = path.display().to_string();
        let file = File::open(path).map_err(|source| SnapshotError::Io {
            path: shown.clone(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
            .map_err(|source| SnapshotError::Decode { path: shown, source })
    }

    /// Decode one snapshot document from any reader.
    pub fn from_reader<R: Read>(
        reader: R,
    ) -> std::result::Result<Snapshot, ciborium::de::Error<std::io::Error>> {
        ciborium::de::from_reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciborium::value::Value;
    use std::io::Cursor;

    fn axis(start: i64, end: i64) -> Value {
        Value::Map(vec![
            (Value::Text("start".into()), Value::Integer(start.into())),
            (Value::Text("end".into()), Value::Integer(end.into())),
        ])
    }

    fn patch(i: (i64, i64), j: (i64, i64), num_fields: i64, data: &[f64]) -> Value {
        Value::Map(vec![
            (
                Value::Text("rect".into()),
                Value::Array(vec![axis(i.0, i.1), axis(j.0, j.1)]),
            ),
            (
                Value::Text("data".into()),
                Value::Array(data.iter().map(|&v| Value::Float(v)).collect()),
            ),
            (
                Value::Text("num_fields".into()),
                Value::Integer(num_fields.into()),
            ),
        ])
    }

    fn encode(doc: &Value) -> Vec<u8> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(doc, &mut bytes).unwrap();
        bytes
    }

    fn document(patches: Vec<Value>) -> Vec<u8> {
        encode(&Value::Map(vec![
            (Value::Text("time".into()), Value::Float(0.1)),
            (Value::Text("iteration".into()), Value::Integer(42.into())),
            (Value::Text("primitive".into()), Value::Array(patches)),
        ]))
    }

    #[test]
    fn decodes_document_with_extra_keys() {
        let bytes = document(vec![patch((0, 2), (0, 2), 1, &[0.1, 0.2, 0.3, 0.4])]);
        let snapshot = Snapshot::from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(snapshot.primitive.len(), 1);
        let record = &snapshot.primitive[0];
        assert_eq!(record.rect[0].start, 0);
        assert_eq!(record.rect[0].end, 2);
        assert_eq!(record.num_fields, 1);
        assert_eq!(record.data, vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn missing_primitive_key_fails() {
        let bytes = encode(&Value::Map(vec![(
            Value::Text("time".into()),
            Value::Float(0.1),
        )]));
        assert!(Snapshot::from_reader(Cursor::new(bytes)).is_err());
    }

    #[test]
    fn garbage_bytes_fail() {
        let bytes = vec![0xff, 0x00, 0x13, 0x37];
        assert!(Snapshot::from_reader(Cursor::new(bytes)).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Snapshot::load(Path::new("/no/such/snapshot.cbor")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn patch_order_is_encounter_order() {
        let bytes = document(vec![
            patch((0, 1), (0, 1), 1, &[0.0]),
            patch((5, 6), (0, 1), 1, &[1.0]),
        ]);
        let snapshot = Snapshot::from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(snapshot.primitive[0].rect[0].start, 0);
        assert_eq!(snapshot.primitive[1].rect[0].start, 5);
    }
}
