//! Weight checkpoint files.
//!
//! ```text
//! NUM_LAYERS:4
//! LAYER_SIZES:2-2-2-1
//!
//! w000,w001
//! w010,w011
//!
//! ...
//! ```
//!
//! A header declares the layer count and hyphen-joined sizes. Each weight
//! layer follows after a blank line, one comma-separated row per source unit.
//! Values use Rust's shortest round-trip float formatting, so a saved tensor
//! reloads bit-for-bit.
use std::path::Path;

use tracing::{debug, info};

use crate::error::{read_text, NetworkError, Result};
use crate::files::scanner::TokenReader;
use crate::math::matrix::Matrix;
use crate::network::topology::{join_sizes, Topology, NUM_LAYERS};
use crate::network::weights::WeightTensor;

const SOURCE: &str = "weights input file";

/// Renders `weights` in checkpoint format.
pub fn format(topology: &Topology, weights: &WeightTensor) -> String {
    let mut out = format!("NUM_LAYERS:{}\nLAYER_SIZES:{}\n", NUM_LAYERS, topology);
    for matrix in weights.layers() {
        out.push('\n');
        for row in &matrix.data {
            let line: Vec<String> = row.iter().map(|w| format!("{:?}", w)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
    }
    out
}

/// Parses a checkpoint, taking the topology from its own header.
pub fn parse(text: &str) -> Result<(Topology, WeightTensor)> {
    let mut reader = TokenReader::new(SOURCE, text);
    let sizes = read_header(&mut reader)?;
    let topology = Topology::from_sizes(&sizes)
        .map_err(|e| NetworkError::Validation(format!("the weights file declares an unusable topology: {}", e)))?;
    let weights = read_layers(&mut reader, &topology)?;
    Ok((topology, weights))
}

/// Parses a checkpoint meant for a network of shape `expected`.
///
/// The header is checked before any weight value is read.
pub fn parse_for(text: &str, expected: &Topology) -> Result<WeightTensor> {
    let mut reader = TokenReader::new(SOURCE, text);
    let sizes = read_header(&mut reader)?;
    if sizes.as_slice() != expected.sizes().as_slice() {
        return Err(NetworkError::Validation(format!(
            "the provided layer sizes ({}) do not match the network layer sizes ({})",
            join_sizes(&sizes),
            expected
        )));
    }
    read_layers(&mut reader, expected)
}

pub fn load(path: &Path, expected: &Topology) -> Result<WeightTensor> {
    let text = read_text("Weights input", path)?;
    let weights = parse_for(&text, expected)?;
    debug!(path = %path.display(), topology = %expected, "read weights file");
    Ok(weights)
}

pub fn save(path: &Path, topology: &Topology, weights: &WeightTensor) -> Result<()> {
    std::fs::write(path, format(topology, weights)).map_err(|source| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saved weights");
    Ok(())
}

fn read_header(reader: &mut TokenReader<'_>) -> Result<Vec<usize>> {
    let num_layers: usize = reader.labeled("NUM_LAYERS")?;
    if num_layers != NUM_LAYERS {
        return Err(NetworkError::Validation(format!(
            "the provided number of layers ({}) does not match the network number of layers ({})",
            num_layers, NUM_LAYERS
        )));
    }
    let sizes = reader.labeled_sizes("LAYER_SIZES")?;
    if sizes.len() != num_layers {
        return Err(NetworkError::Validation(format!(
            "the weights file declares {} layers but lists {} sizes ({})",
            num_layers,
            sizes.len(),
            join_sizes(&sizes)
        )));
    }
    Ok(sizes)
}

fn read_layers(reader: &mut TokenReader<'_>, topology: &Topology) -> Result<WeightTensor> {
    let mut layers = Vec::with_capacity(NUM_LAYERS - 1);
    for l in 0..NUM_LAYERS - 1 {
        let (rows, cols) = topology.weight_shape(l);
        let mut data = Vec::with_capacity(rows);
        for _ in 0..rows {
            data.push(reader.row::<f64>(cols)?);
        }
        layers.push(Matrix::from_data(data));
    }
    let layers: [Matrix; NUM_LAYERS - 1] = layers
        .try_into()
        .map_err(|_| reader.malformed("it does not contain three weight layers"))?;
    reader.finish()?;
    WeightTensor::from_layers(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn topology() -> Topology {
        Topology::new(2, 3, 2, 1).unwrap()
    }

    #[test]
    fn layout_has_header_and_blank_separated_layers() {
        let t = Topology::new(2, 2, 2, 1).unwrap();
        let mut w = WeightTensor::filled(&t, 1.0);
        w.set(0, 1, 0, -0.25);
        let text = format(&t, &w);
        assert_eq!(
            text,
            "NUM_LAYERS:4\nLAYER_SIZES:2-2-2-1\n\n1.0,1.0\n-0.25,1.0\n\n1.0,1.0\n1.0,1.0\n\n1.0\n1.0\n"
        );
    }

    #[test]
    fn round_trip_is_exact() {
        let mut rng = StdRng::seed_from_u64(11);
        let w = WeightTensor::random(&topology(), -3.0, 3.0, &mut rng).unwrap();
        let mut w = w;
        w.set(2, 0, 0, 1e-300);
        w.set(1, 2, 1, -123456.789e10);
        let (t, back) = parse(&format(&topology(), &w)).unwrap();
        assert_eq!(t, topology());
        assert_eq!(back, w);
        assert_eq!(parse_for(&format(&topology(), &w), &topology()).unwrap(), w);
    }

    #[test]
    fn size_mismatch_names_both_lists() {
        let other = Topology::new(2, 3, 3, 1).unwrap();
        let text = format(&other, &WeightTensor::zeros(&other));
        let err = parse_for(&text, &topology()).unwrap_err();
        assert!(matches!(err, NetworkError::Validation(_)));
        let msg = err.to_string();
        assert!(msg.contains("(2-3-3-1)") && msg.contains("(2-3-2-1)"), "{msg}");
    }

    #[test]
    fn wrong_layer_count_is_rejected() {
        let text = "NUM_LAYERS:3\nLAYER_SIZES:2-3-1\n\n0,0,0\n0,0,0\n\n0\n0\n0\n";
        let err = parse_for(text, &topology()).unwrap_err();
        assert!(matches!(err, NetworkError::Validation(_)));
        assert!(err.to_string().contains("(3)") && err.to_string().contains("(4)"));

        let err = parse("NUM_LAYERS:4\nLAYER_SIZES:2-3-1\n").unwrap_err();
        assert!(matches!(err, NetworkError::Validation(_)));
    }

    #[test]
    fn truncated_body_is_malformed() {
        let full = format(&topology(), &WeightTensor::zeros(&topology()));
        let cut = &full[..full.len() - 4];
        let err = parse_for(cut, &topology()).unwrap_err();
        assert!(matches!(err, NetworkError::Malformed { .. }));
    }

    #[test]
    fn non_numeric_weight_is_malformed() {
        let text = "NUM_LAYERS:4\nLAYER_SIZES:1-1-1-1\n\nabc\n\n1\n\n1\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, NetworkError::Malformed { .. }));
    }

    #[test]
    fn rows_of_the_wrong_width_are_malformed() {
        // Same number of values overall, split 3 + 1 instead of 2 + 2.
        let text = "NUM_LAYERS:4\nLAYER_SIZES:2-2-1-1\n\n1,2,3\n4\n\n5\n6\n\n7\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, NetworkError::Malformed { .. }));
        assert!(err.to_string().contains("'1,2,3'"), "{err}");
    }

    #[test]
    fn trailing_values_are_malformed() {
        let mut text = format(&topology(), &WeightTensor::zeros(&topology()));
        text.push_str("\n0.5\n");
        let err = parse_for(&text, &topology()).unwrap_err();
        assert!(err.to_string().contains("trailing data ('0.5')"), "{err}");
    }

    #[test]
    fn zero_sized_layer_in_header_is_invalid() {
        let err = parse("NUM_LAYERS:4\nLAYER_SIZES:1-0-1-1\n").unwrap_err();
        assert!(matches!(err, NetworkError::Validation(_)));
    }
}
