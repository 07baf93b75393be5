use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;

use crate::{
    fs::{file_table::FileRecord, FileSystem},
    shell::menu::run_menu,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Ls,
    Create(String, String),
    Read(String),
    Rm(String),
    Stat(String),
    Df,
    Fsck,
    Format,
    Menu,
    Exit,
}

pub fn execute_command(cmd: &Command, fs: &mut FileSystem) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Help => print_help(),
        Command::Ls => list_files(fs),
        Command::Create(name, content) => {
            fs.create_file(name, content.as_bytes())?;
            println!(
                "📝 Created file: {} ({} bytes)",
                name.green(),
                content.len()
            );
        }
        Command::Read(name) => {
            let content = fs.read_file(name)?;
            println!("📖 Content of {}:", name.cyan());
            println!("{}", String::from_utf8_lossy(&content));
        }
        Command::Rm(name) => {
            let record = fs.delete_file(name)?;
            println!(
                "❌ Deleted file: {} (freed {} blocks)",
                name.red(),
                record.blocks.len()
            );
        }
        Command::Stat(name) => print_stat(fs.stat(name)?),
        Command::Df => {
            let usage = fs.usage();
            println!(
                "{}\n{}: {} x {} bytes\n{}: {}\n{}: {}",
                "💽 Disk Usage".bright_yellow().bold(),
                "Blocks".blue(),
                usage.total,
                usage.block_size,
                "Used".blue(),
                usage.used,
                "Free".blue(),
                usage.free
            );
        }
        Command::Fsck => {
            fs.check()?;
            println!("{}", "✅ File system is consistent".green());
        }
        Command::Format => {
            println!("💾 Formatting virtual disk...");
            let pb = ProgressBar::new(fs.list_files().len() as u64);
            pb.set_style(
                ProgressStyle::with_template("[{bar:40.green/black}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            let removed = fs.format(|record| {
                pb.set_message(record.name.clone());
                pb.inc(1);
            })?;
            pb.finish_with_message(format!("✅ Disk formatted, {} files removed", removed));
        }
        Command::Menu => run_menu(fs)?,
        Command::Exit => println!("{}", "👋 Exiting MiniFS shell...".yellow().bold()),
    }

    Ok(())
}

fn list_files(fs: &FileSystem) {
    let files = fs.list_files();
    if files.is_empty() {
        println!("{}", "No files found.".bright_black());
        return;
    }

    println!("{}", "Files on disk:".bright_cyan());
    for record in files {
        println!(
            " - 📄 {} (Size: {} bytes, Blocks: {:?})",
            record.name.green(),
            record.size,
            record.blocks
        );
    }
}

fn print_stat(record: &FileRecord) {
    println!(
        "{}\n{}: {}\n{}: {} bytes\n{}: {:?}\n{}: {}\n",
        "📊 File Info".bright_yellow().bold(),
        "Name".blue(),
        record.name,
        "Size".blue(),
        record.size,
        "Blocks".blue(),
        record.blocks,
        "Created".blue(),
        record.created.format("%Y-%m-%d %H:%M:%S")
    );
}

fn print_help() {
    println!("{}", "📘 MiniFS Commands".bright_cyan().bold());
    println!(
        "{}",
        "
  ls                      List files in creation order
  create <file> [content] Create file with the given content
  read <file>             Read file content
  rm <file>               Delete file and free its blocks
  stat <file>             Show file info
  df                      Show block usage
  fsck                    Check metadata against block usage
  format                  Delete every file
  menu                    Open the numbered menu
  help                    Show this help message
  exit                    Quit the shell
"
        .bright_black()
    );
}
