// ==========================================
// 库存差异对比系统 - 报表API
// ==========================================
// 职责: 一次运行的门面（请求级，不跨运行共享状态）
// 流程: 逐机构导入（失败隔离并汇总）→ 前置校验（≥2 个有效机构）→ 组装 → 逐份写出
// ==========================================
// 红线: 有效机构不足时整批拒绝，不生成任何报表
// 红线: 开始生成后跑完全程，单份报表写出失败只记录，不影响其他机构
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ParseConfigReader};
use crate::domain::inventory::{AgencyInventory, AgencySubmission, CanonicalInventoryRow};
use crate::engine::{forbidden_sheet_chars, ReportAssembler};
use crate::exporter::{ExportError, GeneratedReport, XlsxReportWriter};
use crate::importer::{ImportError, ImportResult, InventoryImporter, InventoryImporterImpl};
use crate::perf::PerfGuard;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 生成报表所需的最少有效机构数
pub const MIN_VALID_AGENCIES: usize = 2;

// ==========================================
// 导入结果
// ==========================================

/// 单个机构导入失败
#[derive(Debug)]
pub struct AgencyLoadFailure {
    pub index: usize, // 提交序号（从 1 开始）
    pub agency_name: String,
    pub error: ImportError,
}

/// 批量导入结果: 成功与失败分区，各自保持提交顺序
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub agencies: Vec<AgencyInventory>,
    pub failures: Vec<AgencyLoadFailure>,
}

impl LoadOutcome {
    pub fn valid_count(&self) -> usize {
        self.agencies.len()
    }
}

// ==========================================
// 生成结果
// ==========================================

/// 单份报表写出失败
#[derive(Debug)]
pub struct ReportFailure {
    pub reference_agency: String,
    pub error: ExportError,
}

/// 报表生成结果: 成功的报表与失败的参考机构，均保持机构顺序
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    pub reports: Vec<GeneratedReport>,
    pub failures: Vec<ReportFailure>,
}

// ==========================================
// 运行汇总（--json 输出）
// ==========================================

#[derive(Debug, Clone, Serialize)]
pub struct AgencyLoadSummary {
    pub agency: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub index: usize,
    pub agency: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportFailureSummary {
    pub agency: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub agencies: Vec<AgencyLoadSummary>,
    pub failures: Vec<FailureSummary>,
    pub reports: Vec<GeneratedReport>,
    pub report_failures: Vec<ReportFailureSummary>,
    pub elapsed_ms: i64,
}

// ==========================================
// ReportApi
// ==========================================
pub struct ReportApi {
    run_id: Uuid,
    config: ConfigManager,
    importer: InventoryImporterImpl,
    assembler: ReportAssembler,
    writer: XlsxReportWriter,
}

impl ReportApi {
    pub fn new(config: ConfigManager) -> Self {
        let importer = InventoryImporterImpl::from_config(&config);
        Self {
            run_id: Uuid::new_v4(),
            config,
            importer,
            assembler: ReportAssembler::default(),
            writer: XlsxReportWriter::new(),
        }
    }

    /// 加载配置并创建
    ///
    /// # 参数
    /// - config_path: 显式配置文件；None 时使用默认路径（可不存在）
    pub fn load(config_path: Option<&Path>) -> ApiResult<Self> {
        let config = ConfigManager::load(config_path)?;
        Ok(Self::new(config))
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// 导入单个机构
    ///
    /// 机构名先 TRIM；为空或含工作表名禁用字符时直接失败，不读取文件内容
    pub fn load_agency(&self, submission: &AgencySubmission) -> ImportResult<AgencyInventory> {
        let agency_id = submission.agency_name.trim();
        if agency_id.is_empty() {
            return Err(ImportError::EmptyAgencyName(submission.file_name.clone()));
        }

        let forbidden = forbidden_sheet_chars(agency_id);
        if !forbidden.is_empty() {
            return Err(ImportError::InvalidAgencyName {
                name: agency_id.to_string(),
                forbidden,
            });
        }

        let table = self
            .importer
            .import_bytes(&submission.file_name, &submission.bytes)?;
        Ok(AgencyInventory::new(agency_id, table))
    }

    /// 逐个导入机构文件
    pub fn load_agencies(&self, submissions: &[AgencySubmission]) -> LoadOutcome {
        self.load_entries(
            submissions
                .iter()
                .map(|s| (s.agency_name.as_str(), Ok(s))),
        )
    }

    /// 逐个导入提交条目
    ///
    /// 前端已失败的条目（如文件不可读）同样占用一个序号并计入失败；
    /// 单个机构失败只记录，不影响其他机构
    #[instrument(skip(self, entries), fields(run_id = %self.run_id))]
    pub fn load_entries<'a, I>(&self, entries: I) -> LoadOutcome
    where
        I: IntoIterator<Item = (&'a str, ImportResult<&'a AgencySubmission>)>,
    {
        let perf = PerfGuard::new("load_agencies");
        let mut outcome = LoadOutcome::default();

        for (idx, (agency_name, entry)) in entries.into_iter().enumerate() {
            match entry.and_then(|submission| self.load_agency(submission)) {
                Ok(agency) => {
                    info!(agency = %agency.agency_id, rows = agency.table.len(), "机构导入成功");
                    perf.add_items(agency.table.len());
                    outcome.agencies.push(agency);
                }
                Err(error) => {
                    warn!(index = idx + 1, agency = %agency_name, error = %error, "机构导入失败");
                    outcome.failures.push(AgencyLoadFailure {
                        index: idx + 1,
                        agency_name: agency_name.trim().to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            valid = outcome.agencies.len(),
            failed = outcome.failures.len(),
            "批量导入完成"
        );
        outcome
    }

    /// 导入后预览（前 N 行，N 取自配置）
    pub fn preview<'a>(&self, agency: &'a AgencyInventory) -> &'a [CanonicalInventoryRow] {
        agency.table.preview(self.config.preview_rows())
    }

    /// 为每个有效机构生成一份报表
    ///
    /// # 返回
    /// - Ok(GenerationOutcome): 成功报表与写出失败的参考机构，与输入机构顺序一致
    /// - Err(InsufficientAgencies): 有效机构少于 2 个（未构建任何报表）
    #[instrument(skip(self, agencies), fields(run_id = %self.run_id, agencies = agencies.len()))]
    pub fn generate_reports(&self, agencies: &[AgencyInventory]) -> ApiResult<GenerationOutcome> {
        if agencies.len() < MIN_VALID_AGENCIES {
            warn!(valid = agencies.len(), "有效机构不足，拒绝生成报表");
            return Err(ApiError::InsufficientAgencies {
                valid: agencies.len(),
                required: MIN_VALID_AGENCIES,
            });
        }

        let perf = PerfGuard::new("generate_reports");
        let mut generation = GenerationOutcome::default();

        for report in self.assembler.assemble_all(agencies) {
            match self.writer.write(&report) {
                Ok(generated) => generation.reports.push(generated),
                Err(error) => {
                    warn!(reference = %report.reference_agency, error = %error, "报表写出失败");
                    generation.failures.push(ReportFailure {
                        reference_agency: report.reference_agency,
                        error,
                    });
                }
            }
        }

        perf.add_items(generation.reports.len());
        info!(
            reports = generation.reports.len(),
            failed = generation.failures.len(),
            "报表生成完成"
        );
        Ok(generation)
    }

    /// 汇总一次运行（供 --json 输出）
    pub fn summarize(
        &self,
        outcome: &LoadOutcome,
        generation: &GenerationOutcome,
        elapsed_ms: i64,
    ) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            generated_at: Utc::now(),
            agencies: outcome
                .agencies
                .iter()
                .map(|a| AgencyLoadSummary {
                    agency: a.agency_id.clone(),
                    rows: a.table.len(),
                })
                .collect(),
            failures: outcome
                .failures
                .iter()
                .map(|f| FailureSummary {
                    index: f.index,
                    agency: f.agency_name.clone(),
                    message: f.error.to_string(),
                })
                .collect(),
            reports: generation.reports.clone(),
            report_failures: generation
                .failures
                .iter()
                .map(|f| ReportFailureSummary {
                    agency: f.reference_agency.clone(),
                    message: f.error.to_string(),
                })
                .collect(),
            elapsed_ms,
        }
    }
}

impl Default for ReportApi {
    fn default() -> Self {
        Self::new(ConfigManager::default())
    }
}
