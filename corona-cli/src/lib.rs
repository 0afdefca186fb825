// SPDX-FileCopyrightText: 2025 Corona Store Contributors
// SPDX-License-Identifier: MIT

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
