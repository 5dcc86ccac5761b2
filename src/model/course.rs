use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/courses/"]
struct CourseAssets;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("failed to read course manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse course manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no bundled course named {0:?}")]
    MissingAsset(String),
    #[error("course {0:?} contains no sequences")]
    EmptyCourse(String),
}

/// Closed set of unit content types. Unknown strings in a manifest
/// deserialize to `Other` rather than failing the load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Problem,
    Vertical,
    Lock,
    #[serde(other)]
    Other,
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::Other
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub bookmarked: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GatedContent {
    #[serde(default)]
    pub gated: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A navigable group of units. `unit_ids` ordering defines traversal order
/// and is immutable once the course is loaded.
#[derive(Clone, Debug)]
pub struct Sequence {
    pub id: String,
    pub title: String,
    pub unit_ids: Vec<String>,
    pub gated_content: GatedContent,
    pub show_completion: bool,
    pub banner_text: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CourseMeta {
    pub course_id: String,
    pub title: String,
    pub exit_page_enabled: bool,
    pub exit_text: Option<String>,
}

/// What the Next button becomes at the end of the course.
#[derive(Clone, Debug, Default)]
pub struct CourseExitNavigation {
    pub exit_active: bool,
    pub exit_text: Option<String>,
}

// Manifest wire format. Sections exist for outline display; sequence
// traversal order is the flattened section order.

#[derive(Debug, Deserialize)]
struct CourseManifest {
    id: String,
    title: String,
    #[serde(default)]
    exit_page_enabled: bool,
    #[serde(default)]
    exit_text: Option<String>,
    sections: Vec<SectionManifest>,
}

#[derive(Debug, Deserialize)]
struct SectionManifest {
    #[allow(dead_code)]
    id: String,
    title: String,
    sequences: Vec<SequenceManifest>,
}

#[derive(Debug, Deserialize)]
struct SequenceManifest {
    id: String,
    title: String,
    #[serde(default)]
    gated: bool,
    #[serde(default)]
    gated_reason: Option<String>,
    #[serde(default = "default_show_completion")]
    show_completion: bool,
    #[serde(default)]
    banner_text: Option<String>,
    #[serde(default)]
    units: Vec<Unit>,
}

fn default_show_completion() -> bool {
    true
}

/// Read-through cache of an already-hydrated course. The navigation engine
/// only reads from it; `complete`/`bookmarked` are mutated by interaction
/// events outside the engine.
pub struct CourseStore {
    meta: CourseMeta,
    sequence_order: Vec<String>,
    sequences: HashMap<String, Sequence>,
    units: HashMap<String, Unit>,
    section_titles: Vec<(String, Vec<String>)>,
}

impl CourseStore {
    pub fn load(path: &Path) -> Result<Self, CourseError> {
        let content = fs::read_to_string(path)?;
        let manifest: CourseManifest = serde_json::from_str(&content)?;
        Self::from_manifest(manifest)
    }

    pub fn from_json(json: &str) -> Result<Self, CourseError> {
        let manifest: CourseManifest = serde_json::from_str(json)?;
        Self::from_manifest(manifest)
    }

    /// Load a course bundled into the binary (e.g. the demo course).
    pub fn load_bundled(name: &str) -> Result<Self, CourseError> {
        let filename = format!("{name}.json");
        let file = CourseAssets::get(&filename)
            .ok_or_else(|| CourseError::MissingAsset(name.to_string()))?;
        let manifest: CourseManifest = serde_json::from_slice(file.data.as_ref())?;
        Self::from_manifest(manifest)
    }

    pub fn bundled_courses() -> Vec<String> {
        CourseAssets::iter()
            .filter_map(|f| f.strip_suffix(".json").map(|n| n.to_string()))
            .collect()
    }

    fn from_manifest(manifest: CourseManifest) -> Result<Self, CourseError> {
        let mut sequence_order = Vec::new();
        let mut sequences = HashMap::new();
        let mut units = HashMap::new();
        let mut section_titles = Vec::new();

        for section in manifest.sections {
            let mut section_seqs = Vec::new();
            for seq in section.sequences {
                let unit_ids: Vec<String> = seq.units.iter().map(|u| u.id.clone()).collect();
                for unit in seq.units {
                    units.insert(unit.id.clone(), unit);
                }
                sequence_order.push(seq.id.clone());
                section_seqs.push(seq.id.clone());
                sequences.insert(
                    seq.id.clone(),
                    Sequence {
                        id: seq.id,
                        title: seq.title,
                        unit_ids,
                        gated_content: GatedContent {
                            gated: seq.gated,
                            reason: seq.gated_reason,
                        },
                        show_completion: seq.show_completion,
                        banner_text: seq.banner_text,
                    },
                );
            }
            section_titles.push((section.title, section_seqs));
        }

        if sequence_order.is_empty() {
            return Err(CourseError::EmptyCourse(manifest.id));
        }

        Ok(Self {
            meta: CourseMeta {
                course_id: manifest.id,
                title: manifest.title,
                exit_page_enabled: manifest.exit_page_enabled,
                exit_text: manifest.exit_text,
            },
            sequence_order,
            sequences,
            units,
            section_titles,
        })
    }

    pub fn meta(&self) -> &CourseMeta {
        &self.meta
    }

    pub fn course_id(&self) -> &str {
        &self.meta.course_id
    }

    pub fn get_sequence(&self, id: &str) -> Option<&Sequence> {
        self.sequences.get(id)
    }

    pub fn get_unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn get_unit_mut(&mut self, id: &str) -> Option<&mut Unit> {
        self.units.get_mut(id)
    }

    pub fn sequence_order(&self) -> &[String] {
        &self.sequence_order
    }

    pub fn sections(&self) -> &[(String, Vec<String>)] {
        &self.section_titles
    }

    pub fn first_sequence_id(&self) -> &str {
        &self.sequence_order[0]
    }

    fn sequence_index(&self, id: &str) -> Option<usize> {
        self.sequence_order.iter().position(|s| s == id)
    }

    pub fn is_first_sequence(&self, id: &str) -> bool {
        self.sequence_index(id) == Some(0)
    }

    pub fn is_last_sequence(&self, id: &str) -> bool {
        self.sequence_index(id) == Some(self.sequence_order.len() - 1)
    }

    pub fn previous_sequence_id(&self, id: &str) -> Option<&str> {
        let idx = self.sequence_index(id)?;
        idx.checked_sub(1)
            .map(|i| self.sequence_order[i].as_str())
    }

    pub fn next_sequence_id(&self, id: &str) -> Option<&str> {
        let idx = self.sequence_index(id)?;
        self.sequence_order.get(idx + 1).map(|s| s.as_str())
    }

    /// Resolve the course-exit affordance for the Next button. Inactive
    /// courses keep Next disabled on the final unit.
    pub fn course_exit_navigation(&self) -> CourseExitNavigation {
        CourseExitNavigation {
            exit_active: self.meta.exit_page_enabled,
            exit_text: self.meta.exit_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn manifest_json() -> &'static str {
        r#"{
            "id": "course-v1:demo",
            "title": "Demo Course",
            "exit_page_enabled": true,
            "exit_text": "Complete the course",
            "sections": [
                {
                    "id": "sec-1",
                    "title": "Getting Started",
                    "sequences": [
                        {
                            "id": "seq-1",
                            "title": "Welcome",
                            "units": [
                                {"id": "u1", "title": "Intro", "content_type": "video"},
                                {"id": "u2", "title": "Quiz", "content_type": "problem", "complete": true}
                            ]
                        },
                        {
                            "id": "seq-2",
                            "title": "Locked Lesson",
                            "gated": true,
                            "gated_reason": "Pass the entrance exam",
                            "units": [
                                {"id": "u3", "title": "Hidden", "content_type": "other"}
                            ]
                        }
                    ]
                }
            ]
        }"#
    }

    pub(crate) fn demo_store() -> CourseStore {
        CourseStore::from_json(manifest_json()).unwrap()
    }

    #[test]
    fn manifest_loads_and_flattens_sequence_order() {
        let store = demo_store();
        assert_eq!(store.sequence_order(), &["seq-1", "seq-2"]);
        assert_eq!(store.get_sequence("seq-1").unwrap().unit_ids, vec!["u1", "u2"]);
        assert!(store.get_sequence("seq-2").unwrap().gated_content.gated);
        assert_eq!(store.get_unit("u1").unwrap().content_type, ContentType::Video);
    }

    #[test]
    fn unknown_content_type_falls_back_to_other() {
        let unit: Unit =
            serde_json::from_str(r#"{"id": "x", "title": "X", "content_type": "simulation"}"#)
                .unwrap();
        assert_eq!(unit.content_type, ContentType::Other);
    }

    #[test]
    fn adjacent_sequence_lookup() {
        let store = demo_store();
        assert_eq!(store.previous_sequence_id("seq-1"), None);
        assert_eq!(store.next_sequence_id("seq-1"), Some("seq-2"));
        assert_eq!(store.previous_sequence_id("seq-2"), Some("seq-1"));
        assert_eq!(store.next_sequence_id("seq-2"), None);
        assert!(store.is_first_sequence("seq-1"));
        assert!(store.is_last_sequence("seq-2"));
    }

    #[test]
    fn exit_navigation_comes_from_meta() {
        let store = demo_store();
        let exit = store.course_exit_navigation();
        assert!(exit.exit_active);
        assert_eq!(exit.exit_text.as_deref(), Some("Complete the course"));
    }

    #[test]
    fn empty_course_is_rejected() {
        assert!(matches!(
            CourseStore::from_json(r#"{"id": "c", "title": "C", "sections": []}"#),
            Err(CourseError::EmptyCourse(_))
        ));
    }
}
