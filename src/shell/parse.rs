use crate::shell::command::Command;

/// 切出第一个词，返回 (词, 跳过一个分隔符之后的剩余部分)
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(|c: char| c.is_ascii_whitespace()) {
        Some(end) => Some((&input[..end], &input[end + 1..])),
        None => Some((input, "")),
    }
}

pub fn parse_command(input: &str) -> Option<Command> {
    let (cmd, rest) = next_token(input)?;
    let name = || next_token(rest).map(|(name, _)| name.to_string());

    match cmd {
        "help" => Some(Command::Help),
        "ls" => Some(Command::Ls),
        // 文件名之后的原始文本都是文件内容，可以为空
        "create" => next_token(rest)
            .map(|(name, content)| Command::Create(name.to_string(), content.to_string())),
        "read" | "cat" => name().map(Command::Read),
        "rm" => name().map(Command::Rm),
        "stat" => name().map(Command::Stat),
        "df" => Some(Command::Df),
        "fsck" => Some(Command::Fsck),
        "format" => Some(Command::Format),
        "menu" => Some(Command::Menu),
        "exit" | "quit" => Some(Command::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_keeps_content_verbatim() {
        assert_eq!(
            parse_command("create notes.txt hello   big\tworld  "),
            Some(Command::Create(
                "notes.txt".to_string(),
                "hello   big\tworld  ".to_string()
            ))
        );
        assert_eq!(
            parse_command("create  notes.txt  indented"),
            Some(Command::Create("notes.txt".to_string(), " indented".to_string()))
        );
        assert_eq!(
            parse_command("create empty"),
            Some(Command::Create("empty".to_string(), String::new()))
        );
    }

    #[test]
    fn commands_missing_a_name_are_rejected() {
        for input in ["create", "read", "rm  ", "stat"] {
            assert_eq!(parse_command(input), None, "{}", input);
        }
    }

    #[test]
    fn simple_commands_and_aliases() {
        assert_eq!(parse_command("  ls "), Some(Command::Ls));
        assert_eq!(parse_command("cat a"), Some(Command::Read("a".to_string())));
        assert_eq!(parse_command("rm  a  b"), Some(Command::Rm("a".to_string())));
        assert_eq!(parse_command("quit"), Some(Command::Exit));
        assert_eq!(parse_command("df"), Some(Command::Df));
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("mkdir x"), None);
    }
}
