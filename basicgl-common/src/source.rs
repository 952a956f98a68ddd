use std::{fs, path::Path};

use crate::{Diagnostic, Error, Result, ShaderStage};

/// Where a stage's source text comes from.
#[derive(Debug)]
pub enum DataSource<'a, T: ?Sized> {
    Path(&'a Path),
    Inline(&'a T),
}

impl<'a> DataSource<'a, str> {
    pub fn path(path: &'a (impl AsRef<Path> + ?Sized)) -> Self {
        DataSource::Path(path.as_ref())
    }
}

/// Bytes that aren't UTF-8 are replaced rather than rejected, the driver
/// only cares about the code around them.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSource {
    pub text: String,
    pub diagnostic: Option<Diagnostic>,
}

impl StageSource {
    pub fn is_read(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Loads the source for `stage`. A failed read yields empty text and a
/// [`DiagnosticKind::FileRead`](crate::DiagnosticKind::FileRead) diagnostic
/// instead of an error.
pub fn load_stage_source(stage: ShaderStage, data_source: DataSource<'_, str>) -> StageSource {
    match data_source {
        DataSource::Inline(text) => StageSource {
            text: text.to_owned(),
            diagnostic: None,
        },
        DataSource::Path(path) => match read_source(path) {
            Ok(text) => StageSource {
                text,
                diagnostic: None,
            },
            Err(err) => StageSource {
                text: String::new(),
                diagnostic: Some(Diagnostic::file_read(
                    stage,
                    format!("{} shader: {}", stage, err),
                )),
            },
        },
    }
}
