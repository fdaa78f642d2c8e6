use anyhow::{anyhow, Context};
use formatx::formatx;
use std::fmt::Debug;
use std::fs::{create_dir_all, File};
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// A destination for report documents, addressed by a location key such as
/// `feature_reports/default_feature_report` and a file extension.
pub trait Output: Debug {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write>;
    /// Whether this output can be considered a no-op and therefore that any code that only writes to the output can be skipped.
    fn is_noop(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct FileOutput {
    directory_path: PathBuf,
    file_template: String,
}

impl FileOutput {
    /// `file_template` receives the location key and then the extension, e.g. `"{}.{}"`.
    pub fn new(directory_path: PathBuf, file_template: String) -> Self {
        Self {
            directory_path,
            file_template,
        }
    }
}

impl Output for FileOutput {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        let file_name = formatx!(&self.file_template, location_key, file_extension)
            .map_err(|err| anyhow!("could not apply output file template: {err:?}"))?;
        let path = self.directory_path.join(file_name);
        if let Some(parent) = path.parent() {
            create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
        info!("writing report to {}", path.display());

        Ok(BufWriter::new(File::create(&path).with_context(|| {
            format!("creating output file {}", path.display())
        })?))
    }
}

impl Output for &FileOutput {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        <FileOutput as Output>::writer_for_location_key(self, location_key, file_extension)
    }
}

/// An output that goes to nowhere/ a "sink"/ /dev/null.
#[derive(Debug, Default)]
pub struct SinkOutput;

impl Output for SinkOutput {
    fn writer_for_location_key(
        &self,
        _location_key: &str,
        _file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        Ok(io::sink())
    }

    fn is_noop(&self) -> bool {
        true
    }
}

/// Writes `value` as pretty printed JSON to the given location of an output.
pub(crate) fn write_json(
    output: &impl Output,
    location_key: &str,
    value: &serde_json::Value,
) -> anyhow::Result<()> {
    if output.is_noop() {
        return Ok(());
    }
    let mut writer = output.writer_for_location_key(location_key, "json")?;
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;
    use std::fs::read_to_string;

    #[rstest]
    fn should_write_json_into_nested_location() {
        let dir = tempfile::tempdir().unwrap();
        let output = FileOutput::new(dir.path().to_path_buf(), "{}.{}".to_string());

        write_json(&output, "feature_reports/report", &json!({"id": "1"})).unwrap();

        let written = read_to_string(dir.path().join("feature_reports/report.json")).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&written).unwrap(),
            json!({"id": "1"})
        );
    }

    #[rstest]
    fn should_apply_file_template() {
        let dir = tempfile::tempdir().unwrap();
        let output = FileOutput::new(dir.path().to_path_buf(), "scenario_{}.{}".to_string());

        write_json(&&output, "report", &json!({})).unwrap();

        assert!(dir.path().join("scenario_report.json").exists());
    }

    #[rstest]
    fn should_skip_writing_to_sink() {
        assert!(SinkOutput.is_noop());
        write_json(&SinkOutput, "anything", &json!({"a": 1})).unwrap();
    }
}
