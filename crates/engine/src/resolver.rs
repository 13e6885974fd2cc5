// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Infers a media file's status and outputs from its output directory.

use crate::fs::FileProbe;
use autosub_core::{MediaOutputs, MediaStatus, NamingScheme, Output, OutputKind, RunMeta};
use std::path::{Path, PathBuf};

/// Everything the output directory says about one media file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub status: MediaStatus,
    pub outputs: MediaOutputs,
    /// When processing last finished, as far as the files can tell
    pub completion_ts: Option<u64>,
    /// First translation-failure marker found
    pub failed_marker: Option<PathBuf>,
    pub run_meta: Option<RunMeta>,
}

/// Resolve status and outputs for one media file.
///
/// `output_dir` is `None` when the placement cannot name a directory; the
/// file is then pending with no outputs.
pub fn resolve<P: FileProbe + ?Sized>(
    probe: &P,
    naming: &NamingScheme,
    output_dir: Option<&Path>,
    archived: bool,
) -> Observation {
    let Some(dir) = output_dir else {
        let status = if archived { MediaStatus::Archived } else { MediaStatus::Pending };
        return Observation { status, ..Observation::default() };
    };

    let entries = probe.list_dir(dir);
    let outputs = collect_outputs(probe, naming, dir, &entries);
    let failed_marker = entries
        .iter()
        .find(|name| naming.is_failed_marker(name))
        .map(|name| dir.join(name));
    let done_path = dir.join(naming.done_name());

    let status = if archived {
        MediaStatus::Archived
    } else if probe.stat(&dir.join(naming.lock_name())).is_some() {
        MediaStatus::Running
    } else if failed_marker.is_some() {
        MediaStatus::Failed
    } else if probe.stat(&done_path).is_some() || outputs.has_primary() {
        MediaStatus::Done
    } else {
        MediaStatus::Pending
    };

    let completion_ts = outputs.latest_mtime().or_else(|| {
        [Some(done_path.as_path()), failed_marker.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(|p| probe.stat(p))
            .map(|s| s.mtime)
            .max()
    });

    let run_meta = probe
        .read_to_string(&dir.join(naming.run_meta_name()))
        .and_then(|raw| RunMeta::parse(&raw));

    Observation { status, outputs, completion_ts, failed_marker, run_meta }
}

fn collect_outputs<P: FileProbe + ?Sized>(
    probe: &P,
    naming: &NamingScheme,
    dir: &Path,
    entries: &[String],
) -> MediaOutputs {
    let output = |kind: OutputKind, name: &str| -> Option<Output> {
        let path = dir.join(name);
        let stat = probe.stat(&path).filter(|s| s.is_file)?;
        Some(Output::new(kind, path, stat.mtime, stat.size))
    };

    let mut outputs = MediaOutputs {
        raw: output(OutputKind::Raw, &naming.raw_name()),
        zh: naming
            .localized_names()
            .iter()
            .find_map(|name| output(OutputKind::Zh, name))
            .map(|o| o.with_lang(naming.lang())),
        bi: output(OutputKind::Bi, &naming.bilingual_name()),
        other: Vec::new(),
    };

    let claimed: Vec<&Path> = [&outputs.raw, &outputs.zh, &outputs.bi]
        .into_iter()
        .flatten()
        .map(|o| o.path.as_path())
        .collect();
    let mut names: Vec<&String> = entries
        .iter()
        .filter(|name| name.as_str() != naming.raw_name() && naming.is_subtitle_for(name))
        .filter(|name| !claimed.iter().any(|p| p.file_name().is_some_and(|f| f == name.as_str())))
        .collect();
    names.sort();
    let other: Vec<Output> = names.into_iter().filter_map(|name| output(OutputKind::Other, name)).collect();
    outputs.other = other;
    outputs
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
