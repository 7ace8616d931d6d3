//! Intent scripts replayed by the headless CLI.
//!
//! Each non-empty line holds a tick number followed by one or more intents,
//! for example `120 shop buy:pistol`. Text after `#` is ignored.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use house_defence_core::{Intent, MenuChoice, ShopItem, WeaponId};

/// Intents keyed by the tick they are delivered on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    by_tick: BTreeMap<u64, Vec<Intent>>,
}

impl Script {
    /// Reads and parses a script file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid script {}", path.display()))
    }

    /// Parses script text.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut script = Self::default();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let tick = tokens
                .next()
                .unwrap_or_default()
                .parse::<u64>()
                .with_context(|| format!("line {}: expected a tick number", index + 1))?;
            let intents = tokens
                .map(parse_intent)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("line {}", index + 1))?;
            if intents.is_empty() {
                bail!("line {}: no intents after tick {tick}", index + 1);
            }
            script.by_tick.entry(tick).or_default().extend(intents);
        }
        Ok(script)
    }

    /// Intents delivered on `tick`.
    pub(crate) fn intents_at(&self, tick: u64) -> &[Intent] {
        self.by_tick.get(&tick).map_or(&[], Vec::as_slice)
    }
}

fn parse_intent(token: &str) -> Result<Intent> {
    let intent = match token {
        "left" => Intent::MoveLeft,
        "right" => Intent::MoveRight,
        "fire" => Intent::Fire,
        "up" => Intent::CursorUp,
        "down" => Intent::CursorDown,
        "confirm" => Intent::Confirm,
        "cancel" => Intent::Cancel,
        "shop" => Intent::Select(MenuChoice::Shop),
        "radio" => Intent::Select(MenuChoice::Radio),
        "oak" => Intent::Select(MenuChoice::OakTree),
        "pet" => Intent::Select(MenuChoice::Pet),
        "defend" => Intent::Select(MenuChoice::Defend),
        "buy:mirror" => Intent::Select(MenuChoice::Buy(ShopItem::Mirror)),
        other => {
            let Some(key) = other.strip_prefix("buy:") else {
                bail!("unknown intent `{other}`");
            };
            let Some(weapon) = WeaponId::ALL.into_iter().find(|weapon| weapon.key() == key)
            else {
                bail!("unknown weapon `{key}`");
            };
            Intent::Select(MenuChoice::Buy(ShopItem::Weapon(weapon)))
        }
    };
    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_are_grouped_by_tick() {
        let script = Script::parse(
            "# opening\n\
             0 confirm\n\
             5 shop buy:laserGun   # equip\n\
             5 defend\n\
             \n\
             9 fire right fire\n",
        )
        .expect("valid script");

        assert_eq!(script.intents_at(0), &[Intent::Confirm]);
        assert_eq!(
            script.intents_at(5),
            &[
                Intent::Select(MenuChoice::Shop),
                Intent::Select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::LaserGun))),
                Intent::Select(MenuChoice::Defend),
            ]
        );
        assert_eq!(
            script.intents_at(9),
            &[Intent::Fire, Intent::MoveRight, Intent::Fire]
        );
        assert!(script.intents_at(1).is_empty());
    }

    #[test]
    fn unknown_tokens_name_the_line() {
        let error = Script::parse("0 confirm\n3 jump\n").expect_err("jump is not an intent");
        let message = format!("{error:#}");

        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("unknown intent `jump`"), "{message}");
    }

    #[test]
    fn weapons_are_addressed_by_their_key() {
        assert_eq!(
            parse_intent("buy:sniper3000").expect("known weapon"),
            Intent::Select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::Sniper3000)))
        );
        assert!(parse_intent("buy:bazooka").is_err());
    }

    #[test]
    fn a_tick_without_intents_is_rejected() {
        assert!(Script::parse("12\n").is_err());
        assert!(Script::parse("soon fire\n").is_err());
    }
}
