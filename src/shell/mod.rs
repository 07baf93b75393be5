pub mod command;
pub mod menu;
pub mod parse;

use crate::{
    fs::{FileSystem, Usage},
    shell::{
        command::{execute_command, Command},
        parse::parse_command,
    },
};
use colored::*;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal,
};
use std::{error::Error, io::stdout, path::PathBuf, thread, time::Duration};

const COMMANDS: [&str; 11] = [
    "help", "ls", "create", "read", "rm", "stat", "df", "fsck", "format", "menu", "exit",
];

const HISTORY_FILE: &str = ".minifs_history";
const HISTORY_CAPACITY: usize = 100;

pub fn start_shell(mut fs: FileSystem, show_banner: bool) {
    if show_banner {
        if let Err(e) = show_disk_banner(fs.usage()) {
            warn!("banner failed: {}", e);
        }
    }

    let owner = format!("{}@{}", whoami::username(), whoami::hostname());
    let mut line_editor = build_line_editor();

    println!(
        "{}",
        "Type 'help' for commands, 'menu' for the numbered menu.\n".bright_black()
    );

    loop {
        // 右侧提示符显示剩余块数，每条命令后刷新
        let prompt = prompt_for(&owner, fs.usage());

        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(buffer)) => {
                if buffer.trim().is_empty() {
                    continue;
                }

                // 原样交给解析器，文件内容里的空白要保留
                let Some(cmd) = parse_command(&buffer) else {
                    println!(
                        "{}",
                        "⚠️  Unknown command or missing file name. Type 'help' for command list."
                            .yellow()
                    );
                    continue;
                };

                if let Err(e) = execute_command(&cmd, &mut fs) {
                    println!("{} {}", "❌ Error:".red().bold(), e);
                }
                if cmd == Command::Exit {
                    break;
                }
            }
            Ok(Signal::CtrlC) => println!(),
            Ok(_) => {
                println!("{}", "👋 Exiting MiniFS shell...".yellow().bold());
                break;
            }
            Err(e) => {
                warn!("line editor failed: {}", e);
                break;
            }
        }
    }
}

fn build_line_editor() -> Reedline {
    let history_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(HISTORY_FILE);

    let editor = match FileBackedHistory::with_file(HISTORY_CAPACITY, history_path) {
        Ok(history) => Reedline::create().with_history(Box::new(history)),
        Err(e) => {
            warn!("history kept in memory only: {}", e);
            Reedline::create()
        }
    };

    let words = COMMANDS.iter().map(|c| c.to_string()).collect();
    editor.with_completer(Box::new(DefaultCompleter::new_with_wordlen(words, 2)))
}

fn prompt_for(owner: &str, usage: Usage) -> DefaultPrompt {
    DefaultPrompt::new(
        DefaultPromptSegment::Basic(format!("{}:{}", owner.green(), "minifs".blue())),
        DefaultPromptSegment::Basic(format!(
            "{}/{} blocks free",
            usage.free, usage.total
        )),
    )
}

/// 显示磁盘几何信息，并用进度条走一遍所有块
fn show_disk_banner(usage: Usage) -> Result<(), Box<dyn Error>> {
    let mut stdout = stdout();
    execute!(
        stdout,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        SetForegroundColor(Color::Cyan),
        Print(format!("MiniFS v{}\n", env!("CARGO_PKG_VERSION"))),
        ResetColor
    )?;
    println!(
        "💽 {} blocks x {} bytes ({} KiB in memory)",
        usage.total,
        usage.block_size,
        usage.total * usage.block_size as u64 / 1024
    );

    let pb = ProgressBar::new(usage.total);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:32.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▉ "),
    );
    pb.set_message("blocks zeroed");

    let step = (usage.total / 64).max(1);
    while pb.position() < usage.total {
        pb.set_position((pb.position() + step).min(usage.total));
        thread::sleep(Duration::from_millis(4));
    }
    pb.finish_with_message(format!("{} free", usage.free));
    Ok(())
}
