//! Static rule tables for the safety check.
//!
//! Entries are matched either as the exact first word of a command or as a
//! leading phrase followed by a space, so multi-word entries like
//! `docker rm` work without tokenizer support.

/// Prefix that runs the rest of the command with elevated privileges.
pub const ELEVATION_COMMAND: &str = "sudo";

/// Commands that delete, overwrite, or otherwise mutate system state.
pub const DESTRUCTIVE_COMMANDS: &[&str] = &[
    // files
    "rm",
    "mv",
    "shred",
    "dd",
    "chmod",
    "chown",
    // processes and power
    "kill",
    "pkill",
    "killall",
    "shutdown",
    "reboot",
    "halt",
    // disks
    "mkfs",
    "fdisk",
    // accounts and privileges
    "userdel",
    "groupdel",
    "sudo",
    "su",
    // containers
    "docker rm",
    "docker rmi",
    "kubectl delete",
];

/// Find the table entry matching `command`, if any.
pub fn match_destructive(first_token: &str, command: &str) -> Option<&'static str> {
    let command = command.trim();
    DESTRUCTIVE_COMMANDS.iter().copied().find(|entry| {
        first_token == *entry
            || command
                .strip_prefix(entry)
                .is_some_and(|rest| rest.starts_with(' '))
    })
}
