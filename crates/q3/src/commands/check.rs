use std::{
    fmt::{self, Display},
    path::PathBuf,
};

use clap::Args;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use q3_deps::{
    config::{CheckerConfig, ReferenceSets},
    Bucket, Report, Verdict,
};
use tracing::info;

use crate::{commands::Format, source::MapSource};

#[derive(Args)]
pub struct CheckArgs {
    /// Map archives to check, as local paths or http(s) urls
    #[arg(required = true, value_name = "MAP")]
    maps: Vec<String>,

    /// Game install holding the `baseq3` folder
    #[arg(long, env = "Q3_BASE_DIR", value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// The demo `pak0.pk3`
    #[arg(long, value_name = "FILE")]
    demo: Option<PathBuf>,

    /// The retail `pak0.pk3`
    #[arg(long, value_name = "FILE")]
    full: Option<PathBuf>,

    /// A point release archive, replaces the default `pak1.pk3` to `pak7.pk3`
    #[arg(long, value_name = "FILE")]
    patch: Vec<PathBuf>,

    /// Where downloaded maps are stored
    #[arg(long, env = "Q3_DOWNLOAD_DIR", value_name = "DIR", default_value = "downloads")]
    download_dir: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List the members of every bucket
    #[arg(long, default_value_t = false)]
    details: bool,
}

impl CheckArgs {
    pub fn config(&self) -> CheckerConfig {
        let mut config = match &self.base_dir {
            Some(dir) => CheckerConfig::with_base_dir(dir),
            None => CheckerConfig::default(),
        };
        if let Some(demo) = &self.demo {
            config.demo_pak = demo.clone();
        }
        if let Some(full) = &self.full {
            config.full_pak = full.clone();
        }
        if !self.patch.is_empty() {
            config.patch_paks = self.patch.clone();
        }
        config
    }

    pub fn handle(&self) -> Result<()> {
        let config = self.config();
        let references = ReferenceSets::load(&config).context("loading reference archives")?;

        let mut reports = Vec::with_capacity(self.maps.len());
        for map in &self.maps {
            let source = MapSource::parse(map);
            let path = source.fetch(&self.download_dir)?;
            info!(source = %source, "checking map");

            let report = q3_deps::check_map(&path, &references, &config)
                .context(format!("checking {}", path.display()))?;

            if self.format == Format::Text {
                println!("{}", TextReport::new(&report, self.details));
            }
            reports.push(report);
        }

        if self.format == Format::Json {
            let json = serde_json::to_string_pretty(&reports)
                .into_diagnostic()
                .context("serializing reports")?;
            println!("{}", json);
        }

        Ok(())
    }
}

/// Heading of a bucket count line
fn heading(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Map => "Found in map PK3:",
        Bucket::Demo => "Found in demo pak0:",
        Bucket::Patch => "Found in patches pak1-7:",
        Bucket::Full => "Found ONLY IN FULL pak0:",
        Bucket::Missing => "Missing entirely:",
    }
}

/// The terminal rendering of a [`Report`]
pub struct TextReport<'a> {
    report: &'a Report,
    details: bool,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a Report, details: bool) -> Self {
        Self { report, details }
    }

    fn members(&self, bucket: Bucket) -> String {
        self.report
            .classification
            .bucket(bucket)
            .iter()
            .map(|dependency| format!("   {}\n", dependency))
            .join("")
    }

    fn count_line(&self, f: &mut fmt::Formatter<'_>, bucket: Bucket) -> fmt::Result {
        writeln!(
            f,
            "{:<25}{}",
            heading(bucket),
            self.report.counts.get(bucket)
        )?;
        if self.details {
            write!(f, "{}", self.members(bucket))?;
        }
        Ok(())
    }
}

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(
            f,
            "\nMap: {}",
            report.map.display().if_supports_color(Stdout, |t| t.bold())
        )?;
        let declared = format!(
            "{} declares {} dependencies, {} ignored",
            report.dependencies.bsp,
            report.classification.len(),
            report.ignored()
        );
        writeln!(f, "{}", declared.if_supports_color(Stdout, |t| t.dimmed()))?;

        // retail-only assets are listed regardless of --details
        writeln!(f, "\nFound only in full pak0: {}", report.counts.full)?;
        write!(f, "{}", self.members(Bucket::Full))?;

        let summary = report.verdict.summary();
        match report.verdict {
            Verdict::Playable => {
                writeln!(f, "\nRESULT: {}", summary.if_supports_color(Stdout, |t| t.green()))?
            }
            Verdict::Probably(_) => {
                writeln!(f, "\nRESULT: {}", summary.if_supports_color(Stdout, |t| t.yellow()))?
            }
            Verdict::NotPlayable(_) => {
                writeln!(f, "\nRESULT: {}", summary.if_supports_color(Stdout, |t| t.red()))?
            }
        }
        writeln!(f)?;

        let order = match report.verdict {
            Verdict::NotPlayable(_) => [
                Bucket::Full,
                Bucket::Map,
                Bucket::Demo,
                Bucket::Patch,
                Bucket::Missing,
            ],
            _ => Bucket::ALL,
        };
        for bucket in order {
            self.count_line(f, bucket)?;
        }

        Ok(())
    }
}
