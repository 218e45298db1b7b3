// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calc;
pub mod categories;
pub mod exporter;
pub mod insights;
pub mod profile;
pub mod reports;
pub mod reset;
pub mod transactions;
