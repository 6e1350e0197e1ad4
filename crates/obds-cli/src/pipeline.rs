//! The conversion pipeline behind the `obds2to3` binary.
//!
//! Stages: read input, validate input, bind the ADT_GEKID tree, convert,
//! serialize, validate output, write output. Validation runs against
//! ADT_GEKID 2.2.3 for the input and oBDS 3.0.4 for the output unless it is
//! disabled in the options.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use obds_model::SchemaVersion;
use obds_transform::{MapperOptions, ObdsMapper};
use obds_validate::SchemaValidator;
use obds_xml::{read_source_document, write_target_document};
use tracing::{info, info_span};

/// Counts reported after a successful conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub source_patients: usize,
    pub source_messages: usize,
    pub patients: usize,
    pub messages: usize,
}

/// Result of converting one document in memory.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub xml: String,
    pub summary: ConversionSummary,
}

/// Convert an ADT_GEKID document held in memory.
///
/// `today` is the reference day for address validity.
pub fn convert_document(
    xml: &str,
    options: &MapperOptions,
    validator: &dyn SchemaValidator,
    today: NaiveDate,
) -> Result<Conversion> {
    if options.validates_schema() {
        validator
            .validate(xml, SchemaVersion::AdtGekid2_2_3)
            .context("input document failed schema validation")?;
    }

    let source = read_source_document(xml).context("read ADT_GEKID document")?;
    let source_messages = source
        .patients
        .iter()
        .map(|patient| patient.messages.len())
        .sum();

    let target = ObdsMapper::new(*options)
        .map_on(&source, today)
        .context("convert to oBDS v3")?;
    let output = write_target_document(&target).context("write oBDS v3 document")?;

    if options.validates_schema() {
        validator
            .validate(&output, SchemaVersion::Obds3_0_4)
            .context("converted document failed schema validation")?;
    }

    Ok(Conversion {
        xml: output,
        summary: ConversionSummary {
            source_patients: source.patients.len(),
            source_messages,
            patients: target.patients.len(),
            messages: target.message_count(),
        },
    })
}

/// Convert `input` and write the result to `output`, or to stdout when no
/// output path is given.
pub fn run_conversion(
    input: &Path,
    output: Option<&Path>,
    options: &MapperOptions,
    validator: &dyn SchemaValidator,
) -> Result<ConversionSummary> {
    let span = info_span!("convert", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let xml = fs::read_to_string(input)
        .with_context(|| format!("read input file {}", input.display()))?;
    let conversion = convert_document(&xml, options, validator, Local::now().date_naive())?;

    match output {
        Some(path) => fs::write(path, &conversion.xml)
            .with_context(|| format!("write output file {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(conversion.xml.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .context("write to stdout")?;
        }
    }

    let summary = conversion.summary;
    info!(
        source_patients = summary.source_patients,
        source_messages = summary.source_messages,
        patients = summary.patients,
        messages = summary.messages,
        duration_ms = start.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(summary)
}
