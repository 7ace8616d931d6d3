use house_defence_core::{
    ActionError, Economy, Event, MusicTrack, ProgressionSnapshot, Screen, ShopItem, WeaponCatalog,
    WeaponId, WeaponSpec,
};
use tracing::debug;

/// Coins, hearts, wave counters, owned items and the active screen.
///
/// Guarded transitions return an [`ActionError`] and leave the state untouched
/// when refused.
#[derive(Clone, Debug, PartialEq)]
pub struct Progression {
    screen: Screen,
    coins: u32,
    hearts: u32,
    max_hearts: u32,
    current_wave: usize,
    total_waves: usize,
    wave_set: u32,
    selected_weapon: Option<WeaponId>,
    wave_in_progress: bool,
    scroll_found: bool,
    pet_active: bool,
    mirror_power: bool,
    radio_heard: bool,
    shop_cursor: usize,
}

impl Progression {
    /// Creates the state of a fresh session on the start screen.
    #[must_use]
    pub fn new(economy: &Economy, total_waves: usize) -> Self {
        Self {
            screen: Screen::Start,
            coins: economy.starting_coins,
            hearts: economy.max_hearts,
            max_hearts: economy.max_hearts,
            current_wave: 0,
            total_waves,
            wave_set: 0,
            selected_weapon: None,
            wave_in_progress: false,
            scroll_found: false,
            pet_active: false,
            mirror_power: false,
            radio_heard: false,
            shop_cursor: 0,
        }
    }

    /// Switches to `to`, publishing the transition and any music change.
    pub fn change_screen(&mut self, to: Screen, out: &mut Vec<Event>) {
        let from = self.screen;
        if from == to {
            return;
        }
        self.screen = to;
        debug!(?from, ?to, "screen changed");
        out.push(Event::ScreenChanged { from, to });
        if let Some(track) = music_for(to) {
            if music_for(from) != Some(track) {
                out.push(Event::MusicChanged { track });
            }
        }
    }

    /// Opens the shop with the cursor on the first entry.
    pub fn open_shop(&mut self, out: &mut Vec<Event>) {
        self.shop_cursor = 0;
        self.change_screen(Screen::Shop, out);
    }

    /// Heads outside; requires a weapon.
    pub fn enter_defence(&mut self, out: &mut Vec<Event>) -> Result<(), ActionError> {
        if self.selected_weapon.is_none() {
            return Err(ActionError::NoWeapon);
        }
        self.change_screen(Screen::Defend, out);
        Ok(())
    }

    /// Returns to the house; refused while a wave is underway.
    pub fn leave_defence(&mut self, out: &mut Vec<Event>) -> Result<(), ActionError> {
        if self.wave_in_progress {
            return Err(ActionError::WaveInProgress);
        }
        self.change_screen(Screen::House, out);
        Ok(())
    }

    /// Buys and equips `weapon`, returning the coins left.
    pub fn purchase_weapon(
        &mut self,
        weapon: WeaponId,
        spec: &WeaponSpec,
    ) -> Result<u32, ActionError> {
        if spec.secret && !self.scroll_found {
            return Err(ActionError::WeaponLocked { weapon });
        }
        self.spend(spec.price)?;
        self.selected_weapon = Some(weapon);
        Ok(self.coins)
    }

    /// Buys a mirror charge. Only one can be held.
    pub fn purchase_mirror(&mut self, price: u32) -> Result<(), ActionError> {
        if self.mirror_power {
            return Err(ActionError::MirrorAlreadyHeld);
        }
        self.spend(price)?;
        self.mirror_power = true;
        Ok(())
    }

    /// Adopts the pet. It stays for the rest of the session.
    pub fn adopt_pet(&mut self, price: u32) -> Result<(), ActionError> {
        if self.pet_active {
            return Err(ActionError::PetAlreadyAdopted);
        }
        self.spend(price)?;
        self.pet_active = true;
        Ok(())
    }

    /// Marks the scroll as found. Returns `true` on the first discovery.
    pub fn find_scroll(&mut self) -> bool {
        !std::mem::replace(&mut self.scroll_found, true)
    }

    /// Remembers that the radio was heard.
    pub fn hear_radio(&mut self) {
        self.radio_heard = true;
    }

    /// Uses up the mirror charge, reporting whether one was held.
    pub fn consume_mirror(&mut self) -> bool {
        std::mem::replace(&mut self.mirror_power, false)
    }

    /// Adds coins.
    pub fn credit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Removes one heart and returns the hearts left.
    pub fn lose_heart(&mut self) -> u32 {
        self.hearts = self.hearts.saturating_sub(1);
        self.hearts
    }

    /// Marks the current wave as underway.
    pub fn begin_wave(&mut self) {
        self.wave_in_progress = true;
    }

    /// Moves past the cleared wave.
    pub fn complete_wave(&mut self) {
        self.current_wave += 1;
        self.wave_in_progress = false;
    }

    /// Starts the next set after a victory.
    pub fn complete_set(&mut self) {
        self.wave_set += 1;
        self.current_wave = 0;
        self.wave_in_progress = false;
    }

    /// Restores hearts, rewinds the set and goes back into the house.
    ///
    /// The set index, coins and owned items survive.
    pub fn reset_after_game_over(&mut self, out: &mut Vec<Event>) {
        self.hearts = self.max_hearts;
        self.current_wave = 0;
        self.wave_in_progress = false;
        self.change_screen(Screen::House, out);
    }

    /// Shop entries in display order. Secret weapons stay hidden until the
    /// scroll is found.
    #[must_use]
    pub fn shop_entries(&self, catalog: &WeaponCatalog) -> Vec<ShopItem> {
        catalog
            .iter()
            .filter(|(_, spec)| !spec.secret || self.scroll_found)
            .map(|(weapon, _)| ShopItem::Weapon(weapon))
            .chain(std::iter::once(ShopItem::Mirror))
            .collect()
    }

    /// Moves the shop cursor one entry up.
    pub fn cursor_up(&mut self) {
        self.shop_cursor = self.shop_cursor.saturating_sub(1);
    }

    /// Moves the shop cursor one entry down, stopping at the last of `len`.
    pub fn cursor_down(&mut self, len: usize) {
        if self.shop_cursor + 1 < len {
            self.shop_cursor += 1;
        }
    }

    /// Entry under the shop cursor.
    #[must_use]
    pub fn cursor_item(&self, catalog: &WeaponCatalog) -> Option<ShopItem> {
        self.shop_entries(catalog).get(self.shop_cursor).copied()
    }

    /// Active screen.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Coins held.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Hearts left.
    #[must_use]
    pub const fn hearts(&self) -> u32 {
        self.hearts
    }

    /// Zero-based wave index within the set.
    #[must_use]
    pub const fn current_wave(&self) -> usize {
        self.current_wave
    }

    /// Number of regular waves per set.
    #[must_use]
    pub const fn total_waves(&self) -> usize {
        self.total_waves
    }

    /// Whether every regular wave of the set has been cleared.
    #[must_use]
    pub const fn is_set_complete(&self) -> bool {
        self.current_wave >= self.total_waves
    }

    /// Zero-based set index.
    #[must_use]
    pub const fn wave_set(&self) -> u32 {
        self.wave_set
    }

    /// Weapon held by the player.
    #[must_use]
    pub const fn selected_weapon(&self) -> Option<WeaponId> {
        self.selected_weapon
    }

    /// Whether a wave or boss fight is underway.
    #[must_use]
    pub const fn wave_in_progress(&self) -> bool {
        self.wave_in_progress
    }

    /// Whether the pet accompanies the player.
    #[must_use]
    pub const fn pet_active(&self) -> bool {
        self.pet_active
    }

    /// Whether a mirror charge is held.
    #[must_use]
    pub const fn mirror_power(&self) -> bool {
        self.mirror_power
    }

    /// Whether the scroll has been found.
    #[must_use]
    pub const fn scroll_found(&self) -> bool {
        self.scroll_found
    }

    /// Whether the radio has been heard at least once.
    #[must_use]
    pub const fn radio_heard(&self) -> bool {
        self.radio_heard
    }

    /// Captures a read-only snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            screen: self.screen,
            coins: self.coins,
            hearts: self.hearts,
            current_wave: self.current_wave,
            total_waves: self.total_waves,
            wave_set: self.wave_set,
            selected_weapon: self.selected_weapon,
            wave_in_progress: self.wave_in_progress,
            pet_active: self.pet_active,
            mirror_power: self.mirror_power,
            scroll_found: self.scroll_found,
            shop_cursor: self.shop_cursor,
        }
    }

    fn spend(&mut self, price: u32) -> Result<(), ActionError> {
        if self.coins < price {
            return Err(ActionError::InsufficientFunds {
                price,
                coins: self.coins,
            });
        }
        self.coins -= price;
        Ok(())
    }
}

const fn music_for(screen: Screen) -> Option<MusicTrack> {
    match screen {
        Screen::Start => None,
        Screen::House | Screen::Shop => Some(MusicTrack::House),
        Screen::Defend => Some(MusicTrack::Defend),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progression() -> Progression {
        Progression::new(&Economy::default(), 9)
    }

    #[test]
    fn entering_the_house_starts_its_music() {
        let mut progression = progression();
        let mut events = Vec::new();
        progression.change_screen(Screen::House, &mut events);
        assert_eq!(
            events,
            vec![
                Event::ScreenChanged {
                    from: Screen::Start,
                    to: Screen::House,
                },
                Event::MusicChanged {
                    track: MusicTrack::House,
                },
            ]
        );

        events.clear();
        progression.open_shop(&mut events);
        assert_eq!(events.len(), 1, "the shop keeps the house music");
    }

    #[test]
    fn defence_requires_a_weapon() {
        let mut progression = progression();
        let mut events = Vec::new();
        progression.change_screen(Screen::House, &mut events);
        events.clear();

        assert_eq!(
            progression.enter_defence(&mut events),
            Err(ActionError::NoWeapon)
        );
        assert!(events.is_empty());
        assert_eq!(progression.screen(), Screen::House);
    }

    #[test]
    fn leaving_is_refused_mid_wave() {
        let mut progression = progression();
        let catalog = WeaponCatalog::default();
        let mut events = Vec::new();
        let _ = progression
            .purchase_weapon(WeaponId::Pistol, catalog.get(WeaponId::Pistol))
            .expect("affordable");
        progression
            .enter_defence(&mut events)
            .expect("weapon held");
        progression.begin_wave();

        assert_eq!(
            progression.leave_defence(&mut events),
            Err(ActionError::WaveInProgress)
        );
        assert_eq!(progression.screen(), Screen::Defend);
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut progression = progression();
        let catalog = WeaponCatalog::default();
        let _ = progression
            .purchase_weapon(WeaponId::Minigun, catalog.get(WeaponId::Minigun))
            .expect("affordable");
        let before = progression.clone();

        assert_eq!(
            progression.purchase_weapon(WeaponId::Rpg, catalog.get(WeaponId::Rpg)),
            Err(ActionError::InsufficientFunds {
                price: 1000,
                coins: 900,
            })
        );
        assert_eq!(progression, before);
    }

    #[test]
    fn secret_weapon_unlocks_with_the_scroll() {
        let mut progression = progression();
        let catalog = WeaponCatalog::default();
        let sniper = catalog.get(WeaponId::Sniper3000);
        assert_eq!(
            progression.purchase_weapon(WeaponId::Sniper3000, sniper),
            Err(ActionError::WeaponLocked {
                weapon: WeaponId::Sniper3000,
            })
        );
        assert!(!progression
            .shop_entries(&catalog)
            .contains(&ShopItem::Weapon(WeaponId::Sniper3000)));

        assert!(progression.find_scroll());
        assert!(!progression.find_scroll());
        assert_eq!(
            progression.purchase_weapon(WeaponId::Sniper3000, sniper),
            Ok(1000)
        );
        assert!(progression
            .shop_entries(&catalog)
            .contains(&ShopItem::Weapon(WeaponId::Sniper3000)));
    }

    #[test]
    fn mirror_holds_a_single_charge() {
        let mut progression = progression();
        assert_eq!(progression.purchase_mirror(150), Ok(()));
        assert_eq!(
            progression.purchase_mirror(150),
            Err(ActionError::MirrorAlreadyHeld)
        );
        assert!(progression.consume_mirror());
        assert!(!progression.consume_mirror());
        assert_eq!(progression.coins(), 850);
    }

    #[test]
    fn shop_cursor_stays_within_the_entries() {
        let mut progression = progression();
        let catalog = WeaponCatalog::default();
        let len = progression.shop_entries(&catalog).len();
        assert_eq!(len, 6, "five public weapons and the mirror");

        progression.cursor_up();
        assert_eq!(
            progression.cursor_item(&catalog),
            Some(ShopItem::Weapon(WeaponId::Minigun))
        );
        for _ in 0..10 {
            progression.cursor_down(len);
        }
        assert_eq!(progression.cursor_item(&catalog), Some(ShopItem::Mirror));
    }

    #[test]
    fn game_over_reset_keeps_the_set_and_purchases() {
        let mut progression = progression();
        let mut events = Vec::new();
        assert_eq!(progression.adopt_pet(250), Ok(()));
        progression.complete_set();
        progression.complete_wave();
        progression.begin_wave();
        for _ in 0..15 {
            let _ = progression.lose_heart();
        }
        assert_eq!(progression.hearts(), 0);

        progression.reset_after_game_over(&mut events);
        assert_eq!(progression.hearts(), 15);
        assert_eq!(progression.current_wave(), 0);
        assert_eq!(progression.wave_set(), 1);
        assert!(progression.pet_active());
        assert!(!progression.wave_in_progress());
        assert_eq!(progression.screen(), Screen::House);
    }
}
