//! Report structures produced by the five validation checks, plus the
//! collapsed form that gets persisted to disk.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ValidateError;

/// One check's verdict: pass/fail, a one-line summary and its typed,
/// per-file findings. Full details live in memory only; persistence
/// collapses them to a count.
#[derive(Serialize, Clone, Debug)]
pub struct CheckOutcome<T> {
    pub status: bool,
    pub summary: String,
    pub details: T,
}

#[derive(Serialize, Clone, Debug)]
pub struct StructureDetails {
    pub scene_images: bool,
    pub metadata: bool,
    pub annotations: bool,
    pub masks: bool,
    pub depth_maps: bool,
    pub total_files: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct ImageFinding {
    pub file: String,
    pub size: Option<[u32; 2]>,
    pub channels: Option<u8>,
    pub error: Option<String>,
}

impl ImageFinding {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct MetadataFinding {
    pub file: String,
    pub scene_id: Option<u64>,
    pub scene_type: Option<String>,
    pub object_count: usize,
    pub missing_fields: Vec<String>,
    pub error: Option<String>,
}

impl MetadataFinding {
    pub fn ok(&self) -> bool {
        self.error.is_none() && self.missing_fields.is_empty()
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct AnnotationFinding {
    pub file: String,
    pub image_file: Option<String>,
    pub bbox_count: usize,
    pub missing_fields: Vec<String>,
    pub error: Option<String>,
}

impl AnnotationFinding {
    pub fn ok(&self) -> bool {
        self.error.is_none() && self.missing_fields.is_empty()
    }
}

/// One scene image whose derived companions are not all present.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ConsistencyIssue {
    pub image: String,
    pub missing_files: Vec<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ValidationReport {
    pub directory_structure: CheckOutcome<StructureDetails>,
    pub image_files: CheckOutcome<Vec<ImageFinding>>,
    pub metadata_files: CheckOutcome<Vec<MetadataFinding>>,
    pub annotation_files: CheckOutcome<Vec<AnnotationFinding>>,
    pub data_consistency: CheckOutcome<Vec<ConsistencyIssue>>,
}

impl ValidationReport {
    /// Overall verdict: every check passed.
    pub fn passed(&self) -> bool {
        self.directory_structure.status
            && self.image_files.status
            && self.metadata_files.status
            && self.annotation_files.status
            && self.data_consistency.status
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            directory_structure: collapse(
                &self.directory_structure,
                self.directory_structure.details.total_files,
            ),
            image_files: collapse(&self.image_files, self.image_files.details.len()),
            metadata_files: collapse(&self.metadata_files, self.metadata_files.details.len()),
            annotation_files: collapse(&self.annotation_files, self.annotation_files.details.len()),
            data_consistency: collapse(&self.data_consistency, self.data_consistency.details.len()),
        }
    }

    /// Persist the collapsed report.
    pub fn save(&self, path: &Path) -> Result<(), ValidateError> {
        let json = serde_json::to_string_pretty(&self.summary())?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn collapse<T>(check: &CheckOutcome<T>, details_count: usize) -> CheckSummary {
    CheckSummary {
        status: check.status,
        summary: check.summary.clone(),
        details_count,
    }
}

/// Persisted form of one check: details collapsed to a count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CheckSummary {
    pub status: bool,
    pub summary: String,
    pub details_count: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReportSummary {
    pub directory_structure: CheckSummary,
    pub image_files: CheckSummary,
    pub metadata_files: CheckSummary,
    pub annotation_files: CheckSummary,
    pub data_consistency: CheckSummary,
}

impl ReportSummary {
    pub fn passed(&self) -> bool {
        self.directory_structure.status
            && self.image_files.status
            && self.metadata_files.status
            && self.annotation_files.status
            && self.data_consistency.status
    }

    /// Check name/summary pairs in reporting order.
    pub fn checks(&self) -> [(&'static str, &CheckSummary); 5] {
        [
            ("directory_structure", &self.directory_structure),
            ("image_files", &self.image_files),
            ("metadata_files", &self.metadata_files),
            ("annotation_files", &self.annotation_files),
            ("data_consistency", &self.data_consistency),
        ]
    }
}

/// Read a previously persisted report summary.
pub fn load_summary(path: &Path) -> Result<ReportSummary, ValidateError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
