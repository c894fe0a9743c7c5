use tracing::debug;

use super::rules::{self, ELEVATION_COMMAND};
use super::{DestructiveVerdict, VerdictReason};

/// Decide whether `cmd` needs a destructive-command warning.
///
/// Words are split with POSIX shell rules. Input that cannot be split
/// (unbalanced quotes, trailing escape) is treated as destructive.
pub fn analyze_command(cmd: &str) -> DestructiveVerdict {
    let trimmed = cmd.trim();
    if trimmed.is_empty() {
        return DestructiveVerdict::safe();
    }

    let tokens = match shell_words::split(trimmed) {
        Ok(tokens) => tokens,
        Err(e) => {
            debug!(command = trimmed, "tokenize failed: {}", e);
            eprintln!("Warning: Could not properly parse command '{}' for safety check.", trimmed);
            return DestructiveVerdict::destructive(VerdictReason::Unparseable, None);
        }
    };

    let Some(first) = tokens.first() else {
        return DestructiveVerdict::safe();
    };

    if first == ELEVATION_COMMAND && tokens.len() > 1 {
        eprintln!("Warning: Command uses '{}'.", ELEVATION_COMMAND);
        return DestructiveVerdict::destructive(VerdictReason::ElevatedPrivilege, Some(ELEVATION_COMMAND));
    }

    match rules::match_destructive(first, trimmed) {
        Some(entry) => DestructiveVerdict::destructive(VerdictReason::MatchedKeyword, Some(entry)),
        None => DestructiveVerdict::safe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_keyword() {
        let verdict = analyze_command("rm -rf /tmp/x");
        assert!(verdict.is_destructive);
        assert_eq!(verdict.reason, VerdictReason::MatchedKeyword);
        assert_eq!(verdict.matched, Some("rm"));
    }

    #[test]
    fn test_elevated_privilege() {
        let verdict = analyze_command("sudo apt upgrade");
        assert!(verdict.is_destructive);
        assert_eq!(verdict.reason, VerdictReason::ElevatedPrivilege);
    }

    #[test]
    fn test_bare_sudo_hits_table() {
        let verdict = analyze_command("sudo");
        assert!(verdict.is_destructive);
        assert_eq!(verdict.reason, VerdictReason::MatchedKeyword);
        assert_eq!(verdict.matched, Some("sudo"));
    }

    #[test]
    fn test_safe_commands() {
        for cmd in ["ls -la", "du -sh .", "git status", "echo 'rm -rf /'", "rmdir build"] {
            let verdict = analyze_command(cmd);
            assert!(!verdict.is_destructive, "{} should be safe", cmd);
            assert_eq!(verdict.reason, VerdictReason::None);
        }
    }

    #[test]
    fn test_unterminated_quote_is_unparseable() {
        let verdict = analyze_command("echo \"unterminated");
        assert!(verdict.is_destructive);
        assert_eq!(verdict.reason, VerdictReason::Unparseable);
    }

    #[test]
    fn test_quoted_first_word() {
        let verdict = analyze_command("'rm' notes.txt");
        assert_eq!(verdict.reason, VerdictReason::MatchedKeyword);
    }

    #[test]
    fn test_compound_entries() {
        assert_eq!(analyze_command("docker rmi nginx:latest").matched, Some("docker rmi"));
        assert_eq!(analyze_command("kubectl delete ns staging").matched, Some("kubectl delete"));
        assert!(!analyze_command("kubectl get pods").is_destructive);
    }

    #[test]
    fn test_empty_command() {
        assert!(!analyze_command("").is_destructive);
        assert!(!analyze_command("   ").is_destructive);
    }
}
