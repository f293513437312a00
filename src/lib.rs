// patchview - Inspect grid patch snapshots from simulation runs
//
// Pipeline:
//   1. Decode CBOR snapshot documents into typed patch records
//   2. Validate and reshape flat cell data into (i, j, field) arrays
//   3. Reduce field 0 to colored cell meshes with patch outlines
//   4. Show everything in one window with a shared color bar

pub mod app;
pub mod colormap;
pub mod figure;
pub mod patch;
pub mod snapshot;
