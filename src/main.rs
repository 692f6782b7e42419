// ==========================================
// 库存差异对比系统 - 命令行入口
// ==========================================
// 职责: 读取机构文件 → 调用 ReportApi → 报表写入输出目录
// 退出码: 配置错误 / 有效机构不足 / 输出目录写入失败 → 非 0
// 单个机构导入失败、单份报表生成失败只提示
// ==========================================

use agency_ecart_report::api::{ApiError, ReportApi};
use agency_ecart_report::domain::{AgencySubmission, CanonicalInventoryRow};
use agency_ecart_report::importer::{ImportError, ImportResult};
use agency_ecart_report::i18n::{self, t, t_with_args};
use agency_ecart_report::logging;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "agency-ecart-report")]
#[command(about = "Compare les écarts d'inventaire entre agences et génère un rapport Excel par agence")]
#[command(version)]
#[command(after_help = "\
Exemple:
  agency-ecart-report --agency LYON=lyon.csv --agency AIN=ain.xlsx --output-dir rapports")]
struct Cli {
    /// Fichier de configuration JSON
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Répertoire de sortie des rapports (remplace la configuration)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Affiche le récapitulatif d'exécution en JSON sur stdout
    #[arg(long)]
    json: bool,

    /// Agence et fichier d'inventaire, répétable
    #[arg(long = "agency", short = 'a', value_name = "NAME=PATH", value_parser = parse_agency_arg, required = true)]
    agencies: Vec<(String, PathBuf)>,
}

fn parse_agency_arg(value: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = value
        .split_once('=')
        .ok_or_else(|| format!("format attendu NAME=PATH, reçu « {} »", value))?;
    if path.trim().is_empty() {
        return Err(format!("chemin de fichier manquant dans « {} »", value));
    }
    Ok((name.to_string(), PathBuf::from(path)))
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "运行失败");
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let started = Instant::now();

    let api = ReportApi::load(cli.config.as_deref()).context("chargement de la configuration")?;
    i18n::set_locale(api.config().locale());
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| api.config().output_dir());

    tracing::info!("==================================================");
    tracing::info!("{} v{}", agency_ecart_report::APP_NAME, agency_ecart_report::VERSION);
    tracing::info!("==================================================");

    let entries = read_submissions(&cli.agencies);

    if !cli.json {
        println!("{}", t("run.started"));
    }

    let outcome = api.load_entries(
        entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.as_ref().map_err(Clone::clone))),
    );

    for failure in &outcome.failures {
        eprintln!(
            "{}",
            t_with_args(
                "agency.load_failed",
                &[
                    ("index", &failure.index.to_string()),
                    ("name", &failure.agency_name),
                    ("error", &failure.error.to_string()),
                ],
            )
        );
    }

    if !cli.json {
        for agency in &outcome.agencies {
            println!(
                "{}",
                t_with_args(
                    "agency.loaded",
                    &[
                        ("name", &agency.agency_id),
                        ("rows", &agency.table.len().to_string()),
                    ],
                )
            );
            let preview = api.preview(agency);
            println!(
                "{}",
                t_with_args(
                    "agency.preview",
                    &[
                        ("name", &agency.agency_id),
                        ("count", &preview.len().to_string()),
                    ],
                )
            );
            for row in preview {
                println!("  {}", format_preview_row(row));
            }
        }
    }

    let generation = match api.generate_reports(&outcome.agencies) {
        Ok(generation) => generation,
        Err(ApiError::InsufficientAgencies { .. }) => {
            eprintln!("{}", t("run.insufficient_agencies"));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    for failure in &generation.failures {
        eprintln!(
            "{}",
            t_with_args(
                "report.failed",
                &[
                    ("name", &failure.reference_agency),
                    ("error", &failure.error.to_string()),
                ],
            )
        );
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("création du répertoire {}", output_dir.display()))?;

    for report in &generation.reports {
        let path = output_dir.join(&report.file_name);
        std::fs::write(&path, &report.bytes)
            .with_context(|| format!("écriture de {}", path.display()))?;
        if !cli.json {
            println!(
                "{}",
                t_with_args("run.report_written", &[("file", &path.display().to_string())])
            );
        }
    }

    if cli.json {
        let elapsed_ms = started.elapsed().as_millis() as i64;
        let summary = api.summarize(&outcome, &generation, elapsed_ms);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", t("run.done"));
    }

    Ok(ExitCode::SUCCESS)
}

/// 读取所有机构文件
///
/// 不可读的文件记为该机构的导入失败，其余机构照常对比
fn read_submissions(
    agencies: &[(String, PathBuf)],
) -> Vec<(String, ImportResult<AgencySubmission>)> {
    agencies
        .iter()
        .map(|(name, path)| {
            let entry = std::fs::read(path)
                .map(|bytes| AgencySubmission::new(name.as_str(), file_name_of(path), bytes))
                .map_err(|e| ImportError::UnreadableFile {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            (name.clone(), entry)
        })
        .collect()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_preview_row(row: &CanonicalInventoryRow) -> String {
    let num = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    format!(
        "{} | {} | {} | {} | {}",
        row.item_code,
        row.description.as_deref().unwrap_or(""),
        num(row.theoretical_stock),
        num(row.physical_stock),
        num(row.discrepancy),
    )
}
