// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `tix` binary.
//!
//! The black-box tests under `cli/` are built as integration tests of the `tix`
//! package; this library only anchors the directory as a workspace member.
