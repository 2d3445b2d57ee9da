use strsim::levenshtein;

use crate::cli::errors::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Edits further than this are not offered as "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

/// Commands in the order `help` lists them. Lookups are linear; the shell has a dozen commands.
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Keeps the first entry for a name or alias that appears twice.
    pub fn from_entries(entries: Vec<CommandEntry>) -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for entry in entries {
            let taken = std::iter::once(entry.name)
                .chain(entry.aliases.iter().copied())
                .any(|name| registry.get(name).is_some());
            if !taken {
                registry.entries.push(entry);
            }
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.answers_to(name))
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Every name the shell accepts, aliases included.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::once(entry.name).chain(entry.aliases.iter().copied()))
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Closest accepted name to a mistyped `input`, if it is only a few edits away.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &input), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        CommandRegistry::from_entries(vec![
            CommandEntry::new("weeks", "Week table", "weeks", noop),
            CommandEntry::new("summary", "Totals", "summary", noop),
            CommandEntry::new("exit", "Leave", "exit", noop).with_aliases(&["quit"]),
            CommandEntry::new("summary", "Shadowed", "summary", noop),
        ])
    }

    #[test]
    fn keeps_definition_order_and_drops_duplicates() {
        let registry = registry();
        let names: Vec<_> = registry.entries().iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["weeks", "summary", "exit"]);
        assert_eq!(registry.get("summary").unwrap().description, "Totals");
    }

    #[test]
    fn aliases_resolve_to_their_command() {
        let registry = registry();
        assert_eq!(registry.get("quit").unwrap().name, "exit");
        assert!(registry.handler("quit").is_some());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["weeks", "summary", "exit", "quit"]
        );
    }

    #[test]
    fn suggests_only_near_misses() {
        let registry = registry();
        assert_eq!(registry.suggest("sumary"), Some("summary"));
        assert_eq!(registry.suggest("WEKS"), Some("weeks"));
        assert_eq!(registry.suggest("transactions"), None);
    }
}
