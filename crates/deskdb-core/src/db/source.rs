use crate::{
    db::{LoadError, RawRecord},
    model::EntityTag,
};
use globset::Glob;
use serde_json::Value as JsonValue;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

///
/// RecordSource
///
/// Collaborator that hands the loader decoded records for one variant.
/// The loader only needs one sequence of raw mappings per variant.
///

pub trait RecordSource {
    fn records(&self, tag: EntityTag) -> Result<Vec<RawRecord>, LoadError>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn records(&self, tag: EntityTag) -> Result<Vec<RawRecord>, LoadError> {
        (**self).records(tag)
    }
}

///
/// MemorySource
/// In-memory records per variant. A variant with no entry yields no records.
///

#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    records: BTreeMap<EntityTag, Vec<RawRecord>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the records for one variant.
    #[must_use]
    pub fn with(mut self, tag: EntityTag, records: Vec<RawRecord>) -> Self {
        self.records.insert(tag, records);
        self
    }

    /// Decode a JSON array of objects for one variant.
    pub fn with_json(self, tag: EntityTag, json: &JsonValue) -> Result<Self, LoadError> {
        let records = records_from_json(Path::new("<memory>"), json)?;

        Ok(self.with(tag, records))
    }
}

impl RecordSource for MemorySource {
    fn records(&self, tag: EntityTag) -> Result<Vec<RawRecord>, LoadError> {
        Ok(self.records.get(&tag).cloned().unwrap_or_default())
    }
}

///
/// SourceLayout
/// Where one variant's files live: a directory (relative to the base
/// directory) and a glob pattern matched against file names in it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceLayout {
    pub dir: PathBuf,
    pub pattern: String,
}

impl SourceLayout {
    pub fn new(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            pattern: pattern.into(),
        }
    }

    /// Default layout for a variant.
    #[must_use]
    pub fn default_for(tag: EntityTag) -> Self {
        match tag {
            EntityTag::Organization => Self::new("organizations_data", "organization*.json"),
            EntityTag::Account => Self::new("users_data", "users*.json"),
            EntityTag::Case => Self::new("tickets_data", "ticket*.json"),
        }
    }
}

///
/// JsonDirSource
///
/// File-discovery source: each variant's files are the entries of
/// `base/<layout.dir>` whose names match `layout.pattern`, read in sorted
/// path order. Every file holds one JSON array of objects.
///

#[derive(Clone, Debug)]
pub struct JsonDirSource {
    base_dir: PathBuf,
    layouts: [SourceLayout; 3],
}

impl JsonDirSource {
    /// Source rooted at `base_dir` using the default layouts.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            layouts: EntityTag::ALL.map(SourceLayout::default_for),
        }
    }

    /// Override the layout for one variant.
    #[must_use]
    pub fn with_layout(mut self, tag: EntityTag, layout: SourceLayout) -> Self {
        self.layouts[tag.slot()] = layout;
        self
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub const fn layout(&self, tag: EntityTag) -> &SourceLayout {
        &self.layouts[tag.slot()]
    }

    /// Files for one variant, sorted. No match is an error, not an empty set.
    pub fn discover(&self, tag: EntityTag) -> Result<Vec<PathBuf>, LoadError> {
        let layout = self.layout(tag);
        let dir = self.base_dir.join(&layout.dir);
        let matcher = Glob::new(&layout.pattern)
            .map_err(|source| LoadError::Pattern {
                pattern: layout.pattern.clone(),
                source,
            })?
            .compile_matcher();

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NoSourceFiles {
                    pattern: layout.pattern.clone(),
                    dir,
                });
            }
            Err(source) => return Err(LoadError::Io { path: dir, source }),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && matcher.is_match(entry.file_name()) {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(LoadError::NoSourceFiles {
                pattern: layout.pattern.clone(),
                dir,
            });
        }
        files.sort();

        Ok(files)
    }
}

impl RecordSource for JsonDirSource {
    fn records(&self, tag: EntityTag) -> Result<Vec<RawRecord>, LoadError> {
        let mut records = Vec::new();

        for path in self.discover(tag)? {
            let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            let json: JsonValue =
                serde_json::from_str(&text).map_err(|source| LoadError::Decode {
                    path: path.clone(),
                    source,
                })?;
            let decoded = records_from_json(&path, &json)?;

            debug!(entity = %tag, path = %path.display(), records = decoded.len(), "decoded source file");
            records.extend(decoded);
        }

        Ok(records)
    }
}

// Split one decoded document into records; it must be an array of objects.
fn records_from_json(path: &Path, json: &JsonValue) -> Result<Vec<RawRecord>, LoadError> {
    let JsonValue::Array(items) = json else {
        return Err(LoadError::UnexpectedShape {
            path: path.to_path_buf(),
            detail: "expected a top-level array of records".to_string(),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            JsonValue::Object(map) => Ok(map.clone()),
            _ => Err(LoadError::UnexpectedShape {
                path: path.to_path_buf(),
                detail: format!("record {i} is not an object"),
            }),
        })
        .collect()
}
