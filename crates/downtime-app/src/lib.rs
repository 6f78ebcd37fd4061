// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod filter;
pub mod forms;
pub mod model;
pub mod seed;
pub mod selection;
pub mod state;
pub mod store;
pub mod toast;

pub use error::*;
pub use filter::*;
pub use forms::*;
pub use model::*;
pub use seed::*;
pub use selection::*;
pub use state::*;
pub use store::*;
pub use toast::*;
