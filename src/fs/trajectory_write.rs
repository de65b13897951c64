use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::trajectory::{Trajectory, TrajectoryRow};

/// Header line of the tabular trajectory format.
pub const TABLE_HEADER: &str = "num_rounds num_elements_added marginal_gains function_values num_queries";

/// Writes one space-separated row per round, round 0 included, under [`TABLE_HEADER`].
pub fn write_table<W: Write>(trajectory: &Trajectory, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{TABLE_HEADER}")?;
    for TrajectoryRow {
        round,
        num_elements_added,
        marginal_gain,
        function_value,
        num_queries,
    } in trajectory.rows()
    {
        writeln!(
            writer,
            "{round} {num_elements_added} {marginal_gain} {function_value} {num_queries}"
        )?;
    }
    writer.flush()
}

pub fn write_table_to_path<P: AsRef<Path>>(trajectory: &Trajectory, path: P) -> std::io::Result<()> {
    write_table(trajectory, BufWriter::new(File::create(path)?))
}

#[derive(Serialize)]
struct TrajectoryDocument<'a> {
    solution: &'a [usize],
    rows: Vec<TrajectoryRow>,
}

/// Writes the rows and the final solution as one JSON document.
pub fn write_json<W: Write>(trajectory: &Trajectory, writer: W) -> serde_json::Result<()> {
    let document = TrajectoryDocument {
        solution: trajectory.solution(),
        rows: trajectory.rows().collect(),
    };
    serde_json::to_writer_pretty(writer, &document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::element_set;

    fn sample() -> Trajectory {
        let mut trajectory = Trajectory::new();
        trajectory.advance_round();
        trajectory.set_elements_added([2, 7]);
        trajectory.add_marginal_gain(1.5);
        trajectory.raise_value(1.5);
        trajectory.record_queries(12);
        trajectory.set_solution(&element_set([2, 7]));
        trajectory
    }

    #[test]
    fn test_table_has_header_and_round_zero() {
        let mut out = Vec::new();
        write_table(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![TABLE_HEADER, "0 0 0 0 0", "1 2 1.5 1.5 12"]);
    }

    #[test]
    fn test_json_document() {
        let mut out = Vec::new();
        write_json(&sample(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["solution"], serde_json::json!([2, 7]));
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["rows"][1]["num_queries"], 12);
    }

    #[test]
    fn test_write_to_path() {
        let path = std::env::temp_dir().join(format!("submax-table-{}.txt", std::process::id()));
        write_table_to_path(&sample(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(TABLE_HEADER));
        std::fs::remove_file(&path).unwrap();
    }
}
