// patch.rs - Validate patch records and reshape cell data
//
// A raw record is checked once, up front. Nothing downstream sees a patch
// whose flat data does not fill its declared shape.

use crate::snapshot::{PatchRecord, Result, SnapshotError};
use ndarray::{Array3, ArrayView2, Axis};

/// One rectangular patch, validated and reshaped for rendering.
///
/// Cell values are indexed `(i, j, field)` with `i` along the first
/// spatial axis, matching the flat layout in the snapshot file.
#[derive(Debug)]
pub struct Patch {
    origin: (i64, i64),
    fields: Array3<f64>,
}

impl Patch {
    /// Check one raw record and reshape its flat data. `index` is the
    /// patch's position within the snapshot, used in diagnostics.
    pub fn from_record(index: usize, record: PatchRecord) -> Result<Patch> {
        let [ri, rj] = record.rect;
        for (axis, range) in [ri, rj].into_iter().enumerate() {
            if range.end < range.start {
                return Err(SnapshotError::InvertedRange {
                    index,
                    axis,
                    start: range.start,
                    end: range.end,
                });
            }
        }
        if record.num_fields == 0 {
            return Err(SnapshotError::NoFields { index });
        }

        let ni = (ri.end - ri.start) as usize;
        let nj = (rj.end - rj.start) as usize;
        let len = record.data.len();
        let fields = Array3::from_shape_vec((ni, nj, record.num_fields), record.data).map_err(
            |_| SnapshotError::ShapeMismatch {
                index,
                len,
                ni,
                nj,
                num_fields: record.num_fields,
            },
        )?;

        Ok(Patch {
            origin: (ri.start, rj.start),
            fields,
        })
    }

    /// Cell-index origin (i0, j0).
    pub fn origin(&self) -> (i64, i64) {
        self.origin
    }

    /// Cell counts per spatial axis.
    pub fn shape(&self) -> (usize, usize) {
        let s = self.fields.shape();
        (s[0], s[1])
    }

    pub fn num_fields(&self) -> usize {
        self.fields.shape()[2]
    }

    /// View of one scalar field across the patch.
    pub fn field(&self, f: usize) -> ArrayView2<'_, f64> {
        self.fields.index_axis(Axis(2), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AxisRange;

    fn record(i: (i64, i64), j: (i64, i64), num_fields: usize, data: Vec<f64>) -> PatchRecord {
        PatchRecord {
            rect: [
                AxisRange { start: i.0, end: i.1 },
                AxisRange { start: j.0, end: j.1 },
            ],
            data,
            num_fields,
        }
    }

    #[test]
    fn two_by_two_single_field() {
        let patch = Patch::from_record(0, record((0, 2), (0, 2), 1, vec![0.1, 0.2, 0.3, 0.4])).unwrap();
        assert_eq!(patch.origin(), (0, 0));
        assert_eq!(patch.shape(), (2, 2));
        assert_eq!(patch.num_fields(), 1);
    }

    #[test]
    fn reshape_is_row_major() {
        // 2 x 3 cells, 2 fields: value = 10*i + j for field 0, negated for field 1
        let data = vec![
            0.0, -0.0, 1.0, -1.0, 2.0, -2.0, // i = 0
            10.0, -10.0, 11.0, -11.0, 12.0, -12.0, // i = 1
        ];
        let patch = Patch::from_record(0, record((0, 2), (0, 3), 2, data)).unwrap();
        let f0 = patch.field(0);
        assert_eq!(f0[[0, 2]], 2.0);
        assert_eq!(f0[[1, 1]], 11.0);
        let f1 = patch.field(1);
        assert_eq!(f1[[1, 2]], -12.0);
    }

    #[test]
    fn offset_origin_is_kept() {
        let patch = Patch::from_record(3, record((4, 6), (-2, 0), 1, vec![0.0; 4])).unwrap();
        assert_eq!(patch.origin(), (4, -2));
        assert_eq!(patch.shape(), (2, 2));
    }

    #[test]
    fn wrong_data_length_is_a_shape_error() {
        let err = Patch::from_record(1, record((0, 2), (0, 2), 1, vec![0.0, 1.0, 2.0])).unwrap_err();
        match err {
            SnapshotError::ShapeMismatch { index, len, ni, nj, num_fields } => {
                assert_eq!(index, 1);
                assert_eq!(len, 3);
                assert_eq!((ni, nj, num_fields), (2, 2, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Patch::from_record(0, record((0, 2), (5, 3), 1, vec![])).unwrap_err();
        assert!(matches!(err, SnapshotError::InvertedRange { axis: 1, .. }));
    }

    #[test]
    fn zero_fields_is_rejected() {
        let err = Patch::from_record(0, record((0, 2), (0, 2), 0, vec![])).unwrap_err();
        assert!(matches!(err, SnapshotError::NoFields { index: 0 }));
    }

    #[test]
    fn empty_patch_is_valid() {
        let patch = Patch::from_record(0, record((3, 3), (5, 5), 1, vec![])).unwrap();
        assert_eq!(patch.shape(), (0, 0));
    }
}
