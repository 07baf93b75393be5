use colored::*;
use dialoguer::{Input, Select};
use std::error::Error;

use crate::{
    fs::FileSystem,
    shell::command::{execute_command, Command},
};

const MENU_ITEMS: [&str; 5] = [
    "Create File",
    "Read File",
    "Delete File",
    "List Files",
    "Exit",
];

/// 经典的编号菜单，选 Exit 回到 shell
pub fn run_menu(fs: &mut FileSystem) -> Result<(), Box<dyn Error>> {
    loop {
        println!();
        let choice = Select::new()
            .with_prompt("File System Simulation")
            .items(&MENU_ITEMS)
            .default(0)
            .interact()?;

        let cmd = match choice {
            0 => {
                let name = prompt_filename("Enter filename")?;
                let content: String = Input::new()
                    .with_prompt("Enter file content")
                    .allow_empty(true)
                    .interact_text()?;
                Command::Create(name, content)
            }
            1 => Command::Read(prompt_filename("Enter filename to read")?),
            2 => Command::Rm(prompt_filename("Enter filename to delete")?),
            3 => Command::Ls,
            _ => {
                println!("{}", "Leaving menu...".bright_black());
                return Ok(());
            }
        };

        // 菜单内的错误只提示，不退出菜单
        if let Err(e) = execute_command(&cmd, fs) {
            println!("{} {}", "❌ Error:".red().bold(), e);
        }
    }
}

fn prompt_filename(prompt: &str) -> Result<String, Box<dyn Error>> {
    let name: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(name.trim().to_string())
}
