// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MissingFields {
    pub tag: bool,
    pub text: bool,
}

impl MissingFields {
    pub const fn is_empty(self) -> bool {
        !self.tag && !self.text
    }

    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(2);
        if self.tag {
            names.push("tag");
        }
        if self.text {
            names.push("text");
        }
        names
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTarget {
    Category,
    Instance,
}

impl IndexTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Instance => "instance",
        }
    }
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("category tag and text are required -- missing {missing}; fill them in and retry")]
    Validation { missing: MissingFields },
    #[error("{target} {index} does not exist (have {len})")]
    Index {
        target: IndexTarget,
        index: usize,
        len: usize,
    },
}

impl CoreError {
    pub const fn category_index(index: usize, len: usize) -> Self {
        Self::Index {
            target: IndexTarget::Category,
            index,
            len,
        }
    }

    pub const fn instance_index(index: usize, len: usize) -> Self {
        Self::Index {
            target: IndexTarget::Instance,
            index,
            len,
        }
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index { .. })
    }
}
