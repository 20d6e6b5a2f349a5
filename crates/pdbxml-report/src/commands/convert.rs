use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;
use log::{debug, info, warn};
use pdbxml::{ExtractOptions, Extraction, extract_flat, parse_document};

use crate::layout::layout_report;
use crate::sink::{flat_csv_bytes, workbook_bytes, write_atomic};
use crate::utils::file::load_pdbxml_file;
use crate::{OutputFormat, ReportError, ReportOptions};

/// Input suffixes dropped when deriving an output name; `.zst` goes first
const COMPRESSED_SUFFIX: &str = ".zst";
const DOCUMENT_SUFFIXES: [&str; 2] = [".pdbxml", ".xml"];

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub extract: ExtractOptions,
    pub report: ReportOptions,
    pub format: OutputFormat,
}

/// `survey.pdbxml.zst` -> `<dir>/survey_report.xlsx`. Without `output_dir` the
/// report lands beside the input.
pub fn default_output_path(
    input: &Path,
    output_dir: Option<&Path>,
    format: OutputFormat,
) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let file_name: &str = &file_name;

    let stem = strip_suffix_ignore_case(file_name, COMPRESSED_SUFFIX).unwrap_or(file_name);
    let stem = DOCUMENT_SUFFIXES
        .iter()
        .find_map(|suffix| strip_suffix_ignore_case(stem, suffix))
        .unwrap_or(stem);

    let name = format!("{stem}{}", format.default_suffix());
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        name.get(..split)
    } else {
        None
    }
}

/// Convert one export into one report file
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<(), ReportError> {
    let xml = load_pdbxml_file(input)?;
    let malformed = |source| ReportError::MalformedDocument {
        path: input.to_path_buf(),
        source,
    };

    let bytes = match options.format {
        OutputFormat::Xlsx => {
            let extraction = Extraction::parse(&xml, &options.extract).map_err(malformed)?;
            if extraction.form_name.is_none() {
                warn!("{}: no FormName tag, using the default title", input.display());
            }
            debug!(
                "{}: {} test record(s)",
                input.display(),
                extraction.records.len()
            );

            let grid = layout_report(
                extraction.form_name.as_deref(),
                &extraction.records,
                &options.report,
            );
            workbook_bytes(&grid).map_err(|source| ReportError::Xlsx {
                path: output.to_path_buf(),
                source,
            })?
        }
        OutputFormat::Csv => {
            let doc = parse_document(&xml).map_err(malformed)?;
            let records = extract_flat(&doc, &options.extract);
            debug!("{}: {} flat record(s)", input.display(), records.len());

            flat_csv_bytes(&records).map_err(|source| ReportError::Csv {
                path: output.to_path_buf(),
                source,
            })?
        }
    };

    write_atomic(output, &bytes).map_err(|source| ReportError::SinkWriteFailure {
        path: output.to_path_buf(),
        source,
    })?;
    info!("Wrote {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}

/// Convert every input in turn. A failing file is reported and skipped; the
/// batch fails at the end if any file did.
pub fn execute(
    inputs: &[PathBuf],
    output: Option<&Path>,
    output_dir: Option<&Path>,
    options: &ConvertOptions,
) -> Result<()> {
    if output.is_some() && inputs.len() != 1 {
        bail!("--output takes exactly one input; use --output-dir for several");
    }

    let output_dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| inputs.first().and_then(|input| input.parent()).map(Path::to_path_buf));

    let mut failed = 0;
    for input in inputs {
        let target = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input, output_dir.as_deref(), options.format),
        };

        match convert_file(input, &target, options) {
            Ok(()) => println!("✓ Report written to {}", target.display()),
            Err(err) => {
                failed += 1;
                eprintln!("{} {err}", "✗".red().bold());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} file(s) failed to convert", inputs.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SURVEY: &str = r#"<pdbxml>
  <form name="StringA">
    <test date="2024-01-01" resultsguid="g1">
      <data>
        <tag name="FormName">Battery Room</tag>
        <tag name="AvgImpedence">5.2</tag>
        <array name="impedence">
          <arrayitem index="1">5.1</arrayitem>
          <arrayitem index="2">5.3</arrayitem>
        </array>
      </data>
    </test>
  </form>
</pdbxml>"#;

    #[test]
    fn output_names_drop_known_suffixes() {
        let xlsx = OutputFormat::Xlsx;
        assert_eq!(
            default_output_path(Path::new("in/survey.pdbxml"), None, xlsx),
            Path::new("in/survey_report.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("in/survey.PDBXML.zst"), Some(Path::new("out")), xlsx),
            Path::new("out/survey_report.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("survey.xml"), None, OutputFormat::Csv),
            Path::new("survey_output.csv")
        );
        // only the last document suffix goes
        assert_eq!(
            default_output_path(Path::new("a.xml.pdbxml"), None, xlsx),
            Path::new("a.xml_report.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("notes.txt"), None, xlsx),
            Path::new("notes.txt_report.xlsx")
        );
    }

    #[test]
    fn suffix_match_respects_char_boundaries() {
        assert_eq!(strip_suffix_ignore_case("mΩ.XML", ".xml"), Some("mΩ"));
        assert_eq!(strip_suffix_ignore_case("Ωx", ".xml"), None);
        assert_eq!(strip_suffix_ignore_case("ΩΩ", "xΩ"), None);
    }

    #[test]
    fn converts_to_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("survey.pdbxml");
        fs::write(&input, SURVEY).unwrap();

        let xlsx = dir.path().join("out/survey_report.xlsx");
        convert_file(&input, &xlsx, &ConvertOptions::default()).unwrap();
        assert!(fs::read(&xlsx).unwrap().starts_with(b"PK"));

        let csv = dir.path().join("survey_output.csv");
        let options = ConvertOptions {
            format: OutputFormat::Csv,
            ..Default::default()
        };
        convert_file(&input, &csv, &options).unwrap();
        assert_eq!(
            fs::read_to_string(&csv).unwrap(),
            "form_name,test_date,resultsguid,FormName,AvgImpedence,impedence\n\
             StringA,2024-01-01,g1,Battery Room,5.2,\"5.1, 5.3\"\n"
        );
    }

    #[test]
    fn broken_documents_leave_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.pdbxml");
        fs::write(&input, "<pdbxml><form>").unwrap();
        let output = dir.path().join("broken_report.xlsx");

        let err = convert_file(&input, &output, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedDocument { .. }));
        assert!(err.to_string().contains("broken.pdbxml"));
        assert!(!output.exists());

        let err = convert_file(&dir.path().join("absent.xml"), &output, &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingInput(_)));
    }

    #[test]
    fn unwritable_destination_is_a_sink_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("survey.pdbxml");
        fs::write(&input, SURVEY).unwrap();
        let blocker = dir.path().join("reports");
        fs::write(&blocker, "plain file").unwrap();

        for format in [OutputFormat::Xlsx, OutputFormat::Csv] {
            let output = blocker.join(format!("survey{}", format.default_suffix()));
            let options = ConvertOptions {
                format,
                ..Default::default()
            };

            let err = convert_file(&input, &output, &options).unwrap_err();
            match &err {
                ReportError::SinkWriteFailure { path, .. } => assert_eq!(path, &output),
                other => panic!("unexpected error: {other:?}"),
            }
            assert!(err.to_string().contains("survey"));
            assert!(!output.exists());
        }
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "plain file");
    }

    #[test]
    fn output_flag_rejects_batches() {
        let inputs = vec![PathBuf::from("a.xml"), PathBuf::from("b.xml")];
        let err = execute(
            &inputs,
            Some(Path::new("out.xlsx")),
            None,
            &ConvertOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("--output"));
    }
}
