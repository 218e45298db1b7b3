// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calculators;
pub mod categorizer;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod store;
pub mod utils;
