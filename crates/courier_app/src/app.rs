use std::sync::mpsc;

use anyhow::{bail, Context};
use clap::Parser;
use courier_core::{update, AppState, Msg, NoticeLevel};
use courier_engine::{inspect_file, ClientSettings, EngineConfig};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::Cli;
use crate::effects::{from_upload, EffectRunner};
use crate::logging::{self, LogDestination};
use crate::render;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(
        if cli.log_file {
            LogDestination::Both
        } else {
            LogDestination::Terminal
        },
        cli.verbose,
    );

    let mut picked = Vec::new();
    for path in &cli.files {
        let upload =
            inspect_file(path).with_context(|| format!("cannot use {}", path.display()))?;
        picked.push(from_upload(upload));
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let config = EngineConfig {
        settings: ClientSettings {
            base_url: cli.server.clone(),
            ..ClientSettings::default()
        },
        output_dir: cli.output.clone(),
    };
    let runner = EffectRunner::new(config, msg_tx);

    let state = AppState::new();
    let (state, _) = dispatch(state, Msg::ModeSelected(cli.mode.into()), &runner);
    let (state, _) = match &cli.base_name {
        Some(name) => dispatch(state, Msg::BaseNameChanged(name.clone()), &runner),
        None => (state, 0),
    };
    let (mut state, _) = dispatch(state, Msg::FilesPicked(picked), &runner);

    state.consume_dirty();
    render::print_selection(&state.view());

    let (next, dispatched) = dispatch(state, Msg::ProcessClicked, &runner);
    let mut state = next;
    if dispatched == 0 {
        if let Some(notice) = state.view().notice {
            render::print_notice(&notice);
            bail!("{}", notice.message);
        }
        bail!("nothing to process");
    }

    let total = state.view().run.map(|run| run.total).unwrap_or_default();
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} Image {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    while state.is_running() {
        let msg = msg_rx.recv().context("engine event channel closed")?;
        let (next, _) = dispatch(state, msg, &runner);
        state = next;
        if let Some(run) = state.view().run {
            bar.set_position(run.completed as u64);
            if let Some(current) = run.current {
                bar.set_message(current);
            }
        }
    }
    bar.finish_and_clear();

    let view = state.view();
    if let Some(notice) = &view.notice {
        render::print_notice(notice);
        if notice.level == NoticeLevel::Error {
            bail!("processing failed");
        }
    }
    render::print_results(&view);

    let mut pending = 0usize;
    if cli.download {
        let (next, dispatched) = dispatch(state, Msg::DownloadAllClicked, &runner);
        state = next;
        pending += dispatched;
    }
    if cli.zip {
        let (next, dispatched) = dispatch(state, Msg::DownloadZipClicked, &runner);
        state = next;
        if dispatched == 0 {
            if let Some(notice) = state.view().notice {
                render::print_notice(&notice);
            }
        }
        pending += dispatched;
    }

    while pending > 0 {
        let msg = msg_rx.recv().context("engine event channel closed")?;
        let completion = matches!(msg, Msg::DownloadsFinished { .. } | Msg::ZipFinished { .. });
        let (next, _) = dispatch(state, msg, &runner);
        state = next;
        if completion {
            pending -= 1;
            if let Some(notice) = state.view().notice {
                render::print_notice(&notice);
            }
        }
    }

    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> (AppState, usize) {
    let (state, effects) = update(state, msg);
    let count = effects.len();
    runner.enqueue(effects);
    (state, count)
}
