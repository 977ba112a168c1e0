use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when `path` is `None`.
pub(crate) fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let (mut writer, target): (Box<dyn Write>, String) = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write newline to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {target}"))
}

pub(crate) fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use tetrimax_evaluator::EvaluatorWeights;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("tetrimax-{}-{name}", process::id()))
    }

    #[test]
    fn test_weights_file_round_trip() {
        let path = temp_path("weights.json");
        let weights = EvaluatorWeights {
            holes: -2.0,
            ..EvaluatorWeights::default()
        };
        save_json(&weights, Some(&path)).unwrap();
        let loaded: EvaluatorWeights = read_json_file("weights", &path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, weights);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_json_file::<EvaluatorWeights, _>("weights", &path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("Failed to parse weights JSON file"));
    }
}
