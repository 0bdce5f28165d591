//! 年级 → 教学点对照表

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

/// 内置年级（按下拉框显示顺序）及其标签
const DEFAULT_GRADES: [(&str, &str); 5] = [
    ("1st prep", "1st Preparatory"),
    ("2nd prep", "2nd Preparatory"),
    ("3rd prep", "3rd Preparatory"),
    ("1st sec", "1st Secondary"),
    ("2nd sec", "2nd Secondary"),
];

/// 内置年级可选的教学点
static DEFAULT_CENTERS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "1st prep" => &["cambridge"],
    "2nd prep" => &["cambridge", "heights"],
    "3rd prep" => &["heights", "60"],
    "1st sec" => &["heights", "60", "top academy"],
    "2nd sec" => &["heights", "60"],
};

/// 单个年级及其可选教学点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub key: String,
    #[serde(default)]
    pub label: String,
    pub centers: Vec<String>,
}

/// 年级 → 有序教学点集合，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeCenterTable {
    grades: Vec<GradeEntry>,
}

impl GradeCenterTable {
    /// 从配置项构造，会去除首尾空白并检查重复
    pub fn new(entries: Vec<GradeEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyGradeTable);
        }

        let mut seen = HashSet::new();
        let mut grades = Vec::with_capacity(entries.len());

        for entry in entries {
            let key = entry.key.trim().to_string();
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateGrade { key });
            }

            let mut centers: Vec<String> = Vec::with_capacity(entry.centers.len());
            for center in entry.centers {
                let center = center.trim().to_string();
                if !center.is_empty() && !centers.contains(&center) {
                    centers.push(center);
                }
            }
            if centers.is_empty() {
                return Err(ConfigError::EmptyCenters { grade: key });
            }

            let label = match entry.label.trim() {
                "" => key.clone(),
                label => label.to_string(),
            };

            grades.push(GradeEntry { key, label, centers });
        }

        Ok(Self { grades })
    }

    pub fn grades(&self) -> &[GradeEntry] {
        &self.grades
    }

    pub fn get(&self, key: &str) -> Option<&GradeEntry> {
        self.grades.iter().find(|g| g.key == key)
    }

    pub fn contains_grade(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 年级可选的教学点；未知年级返回空切片
    pub fn centers(&self, key: &str) -> &[String] {
        self.get(key).map(|g| g.centers.as_slice()).unwrap_or(&[])
    }
}

impl Default for GradeCenterTable {
    fn default() -> Self {
        let grades = DEFAULT_GRADES
            .iter()
            .map(|(key, label)| GradeEntry {
                key: key.to_string(),
                label: label.to_string(),
                centers: DEFAULT_CENTERS
                    .get(*key)
                    .map(|centers| centers.iter().map(|c| c.to_string()).collect())
                    .unwrap_or_default(),
            })
            .collect();
        Self { grades }
    }
}
