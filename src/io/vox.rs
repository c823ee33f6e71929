//! # `.vox` Scene Files
//!
//! A scene is stored as five newline-separated records, always in this
//! order:
//!
//! ```text
//! 1,2,                 kind codes, each followed by ','
//! 0,0,0,;1,2,3,;       translates: one group per object, each ended by ';'
//! 0,0,0,;0,90,0,;      rotations (degrees)
//! 1,1,1,;2,2,2,;       scales
//! 0.8,0.8,0.8,;1,0,0,; colors
//! ```
//!
//! Inside a group every number is followed by `,`. The last element of
//! every split is the text after the final terminator and is discarded, so
//! a record without its terminator contributes nothing.
//!
//! Decoding is lenient: a number that does not parse, or is missing, reads
//! as zero. Each such recovery is listed in the [`DecodeReport`] so callers
//! can tell a clean read from a repaired one. Lines after the fifth are
//! ignored.

use std::fmt::{self, Write as _};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use cgmath::Vector3;

use crate::error::{Result, SceneError};
use crate::gfx::scene::{Attribute, PrimitiveKind, Scene, SceneObject};

/// File extension used for saved scenes.
pub const FILE_EXTENSION: &str = "vox";

/// The five records of a scene file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Record {
    Kinds,
    Translates,
    Rotations,
    Scales,
    Colors,
}

impl Record {
    pub const ALL: [Record; 5] = [
        Record::Kinds,
        Record::Translates,
        Record::Rotations,
        Record::Scales,
        Record::Colors,
    ];

    /// Zero-based line number of the record.
    pub fn line(self) -> usize {
        self as usize
    }

    /// The object attribute stored in this record, if it holds vectors.
    pub fn attribute(self) -> Option<Attribute> {
        match self {
            Record::Kinds => None,
            Record::Translates => Some(Attribute::Translate),
            Record::Rotations => Some(Attribute::Rotate),
            Record::Scales => Some(Attribute::Scale),
            Record::Colors => Some(Attribute::Color),
        }
    }
}

/// Why a field was recovered during decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Text that is not a number; read as zero (or `Plane` for kinds).
    Malformed(String),
    /// A kind code outside 0–6; read as `Plane`.
    UnknownKind(i64),
    /// No value present; read as zero.
    Missing,
    /// A fourth (or later) component in a group; ignored.
    ExtraComponent,
    /// A group with no matching kind code; ignored.
    ExtraGroup,
}

/// One recovered field.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeIssue {
    pub record: Record,
    /// Object (group) index within the record.
    pub group: usize,
    /// Component within the group; `None` when the whole group is affected.
    pub component: Option<usize>,
    pub problem: Problem,
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} record, group {}", self.record, self.group)?;
        if let Some(component) = self.component {
            write!(f, ", component {}", component)?;
        }
        match &self.problem {
            Problem::Malformed(text) => write!(f, ": malformed value {:?}", text),
            Problem::UnknownKind(code) => write!(f, ": unknown primitive code {}", code),
            Problem::Missing => write!(f, ": missing"),
            Problem::ExtraComponent => write!(f, ": extra component ignored"),
            Problem::ExtraGroup => write!(f, ": group without object ignored"),
        }
    }
}

/// Objects read from a scene file plus every field that had to be repaired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub objects: Vec<SceneObject>,
    pub issues: Vec<DecodeIssue>,
}

impl DecodeReport {
    /// True if nothing was defaulted or ignored.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Serializes a scene. Never fails.
pub fn encode_scene(scene: &Scene) -> String {
    encode(scene.objects())
}

/// Serializes objects in the five-record format.
///
/// Numbers use the shortest representation that parses back to the same
/// `f64`. The last record has no trailing newline.
pub fn encode(objects: &[SceneObject]) -> String {
    let mut out = String::new();

    for object in objects {
        let _ = write!(out, "{},", object.kind.code());
    }

    for record in &Record::ALL[1..] {
        out.push('\n');
        if let Some(attribute) = record.attribute() {
            for object in objects {
                let v = object.attribute(attribute);
                let _ = write!(out, "{},{},{},;", v.x, v.y, v.z);
            }
        }
    }

    out
}

/// Parses scene text. Never fails; see [`DecodeReport::issues`].
///
/// The number of objects is the number of kind codes in the first record.
pub fn decode(text: &str) -> DecodeReport {
    let lines: Vec<&str> = text.lines().take(Record::ALL.len()).collect();
    let line = |record: Record| lines.get(record.line()).copied().unwrap_or("");

    let mut issues = Vec::new();
    let mut objects: Vec<SceneObject> = terminated(line(Record::Kinds), ',')
        .enumerate()
        .map(|(group, code)| SceneObject::new(decode_kind(code, group, &mut issues)))
        .collect();

    for record in &Record::ALL[1..] {
        if let Some(attribute) = record.attribute() {
            decode_vectors(line(*record), *record, attribute, &mut objects, &mut issues);
        }
    }

    DecodeReport { objects, issues }
}

/// Writes `scene` to `path`, replacing any previous content.
pub fn save(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode_scene(scene)).map_err(|e| {
        log::warn!("Could not save scene to {}: {}", path.display(), e);
        SceneError::file_unavailable(path, e)
    })?;

    log::info!("Saved {} objects to {}", scene.len(), path.display());
    Ok(())
}

/// Reads and decodes a scene file without touching any scene.
///
/// Only the five records are read; whatever follows them is never loaded.
pub fn read(path: impl AsRef<Path>) -> Result<DecodeReport> {
    let path = path.as_ref();
    let text = File::open(path)
        .and_then(|file| read_records(BufReader::new(file)))
        .map_err(|e| {
            log::warn!("Could not open scene file {}: {}", path.display(), e);
            SceneError::file_unavailable(path, e)
        })?;

    let report = decode(&text);
    for issue in &report.issues {
        log::warn!("{}: {}", path.display(), issue);
    }
    Ok(report)
}

/// Loads `path` and appends its objects to `scene`.
///
/// Existing objects are kept: load into an empty scene to replace it. If
/// the file cannot be opened the scene is left untouched.
pub fn load(scene: &mut Scene, path: impl AsRef<Path>) -> Result<DecodeReport> {
    let path = path.as_ref();
    let report = read(path)?;

    if !scene.is_empty() {
        log::warn!(
            "Loading {} into a scene that already holds {} objects; appending",
            path.display(),
            scene.len()
        );
    }
    let count = scene.append(report.objects.iter().copied());

    log::info!("Loaded {} objects from {}", count, path.display());
    log::debug!("Scene after load: {:#?}", scene.objects());
    Ok(report)
}

/// Reads at most one line per record, stopping early at end of input.
///
/// Invalid UTF-8 within those lines is replaced, not rejected.
fn read_records(mut reader: impl BufRead) -> io::Result<String> {
    let mut text = String::new();
    let mut line = Vec::new();

    for _ in Record::ALL {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        text.push_str(&String::from_utf8_lossy(&line));
    }
    Ok(text)
}

/// Elements of `line` split on `terminator`, minus the unterminated tail.
fn terminated(line: &str, terminator: char) -> impl Iterator<Item = &str> {
    let mut parts: Vec<&str> = line.split(terminator).collect();
    parts.pop();
    parts.into_iter()
}

fn decode_kind(text: &str, group: usize, issues: &mut Vec<DecodeIssue>) -> PrimitiveKind {
    let mut report = |problem| {
        issues.push(DecodeIssue {
            record: Record::Kinds,
            group,
            component: None,
            problem,
        })
    };

    match text.trim().parse::<i64>() {
        Ok(code) => PrimitiveKind::try_from(code).unwrap_or_else(|_| {
            report(Problem::UnknownKind(code));
            PrimitiveKind::Plane
        }),
        Err(_) => {
            report(Problem::Malformed(text.to_string()));
            PrimitiveKind::Plane
        }
    }
}

fn decode_vectors(
    line: &str,
    record: Record,
    attribute: Attribute,
    objects: &mut [SceneObject],
    issues: &mut Vec<DecodeIssue>,
) {
    let groups: Vec<&str> = terminated(line, ';').collect();

    for (group, object) in objects.iter_mut().enumerate() {
        let value = match groups.get(group) {
            Some(text) => decode_vector(text, record, group, issues),
            None => {
                issues.push(DecodeIssue {
                    record,
                    group,
                    component: None,
                    problem: Problem::Missing,
                });
                Vector3::new(0.0, 0.0, 0.0)
            }
        };
        object.set_attribute(attribute, value);
    }

    for group in objects.len()..groups.len() {
        issues.push(DecodeIssue {
            record,
            group,
            component: None,
            problem: Problem::ExtraGroup,
        });
    }
}

fn decode_vector(
    text: &str,
    record: Record,
    group: usize,
    issues: &mut Vec<DecodeIssue>,
) -> Vector3<f64> {
    let mut components = [0.0f64; 3];
    let mut present = 0;

    for (component, number) in terminated(text, ',').enumerate() {
        let mut report = |problem| {
            issues.push(DecodeIssue {
                record,
                group,
                component: Some(component),
                problem,
            })
        };

        if component >= components.len() {
            report(Problem::ExtraComponent);
            continue;
        }
        present += 1;
        match number.trim().parse::<f64>() {
            Ok(value) => components[component] = value,
            Err(_) => report(Problem::Malformed(number.to_string())),
        }
    }

    for component in present..components.len() {
        issues.push(DecodeIssue {
            record,
            group,
            component: Some(component),
            problem: Problem::Missing,
        });
    }

    Vector3::from(components)
}
