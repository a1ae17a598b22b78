//! Built-in creatives.

use adrelay_core::{CreativeEntry, Language, LocalizedText};

const SECONDS_PER_CREATIVE: u32 = 8;

/// The creatives shipped with the game: three in-house promos, eight seconds
/// each.
pub fn default_creatives() -> Vec<CreativeEntry> {
    vec![
        CreativeEntry {
            name: "daily_bonus".to_string(),
            title: LocalizedText::from([
                (Language::En, "Daily bonus"),
                (Language::Ru, "Ежедневный бонус"),
                (Language::Uk, "Щоденний бонус"),
                (Language::Es, "Bono diario"),
                (Language::Pt, "Bônus diário"),
                (Language::Tr, "Günlük bonus"),
                (Language::Id, "Bonus harian"),
            ]),
            description: LocalizedText::from([
                (Language::En, "Come back every day for free coins."),
                (Language::Ru, "Заходите каждый день за бесплатными монетами."),
            ]),
            button_text: LocalizedText::from([
                (Language::En, "Claim"),
                (Language::Ru, "Забрать"),
                (Language::Es, "Reclamar"),
            ]),
            target_url: "https://t.me/adrelay_game?start=daily".to_string(),
            image_url: "/assets/ads/daily-bonus.webp".to_string(),
            duration_seconds: SECONDS_PER_CREATIVE,
            is_horizontal: false,
        },
        CreativeEntry {
            name: "tournament".to_string(),
            title: LocalizedText::from([
                (Language::En, "Weekly tournament"),
                (Language::Ru, "Еженедельный турнир"),
                (Language::Uk, "Щотижневий турнір"),
                (Language::Es, "Torneo semanal"),
                (Language::Pt, "Torneio semanal"),
                (Language::Tr, "Haftalık turnuva"),
                (Language::Id, "Turnamen mingguan"),
            ]),
            description: LocalizedText::from([
                (Language::En, "Climb the leaderboard and win prizes."),
                (Language::Ru, "Поднимайтесь в рейтинге и выигрывайте призы."),
            ]),
            button_text: LocalizedText::from([
                (Language::En, "Join"),
                (Language::Ru, "Участвовать"),
                (Language::Es, "Unirse"),
            ]),
            target_url: "https://t.me/adrelay_game?start=tournament".to_string(),
            image_url: "/assets/ads/tournament.webp".to_string(),
            duration_seconds: SECONDS_PER_CREATIVE,
            is_horizontal: true,
        },
        CreativeEntry {
            name: "invite_friends".to_string(),
            title: LocalizedText::from([
                (Language::En, "Invite friends"),
                (Language::Ru, "Пригласите друзей"),
                (Language::Uk, "Запросіть друзів"),
                (Language::Es, "Invita a tus amigos"),
                (Language::Pt, "Convide amigos"),
                (Language::Tr, "Arkadaşlarını davet et"),
                (Language::Id, "Undang teman"),
            ]),
            description: LocalizedText::from([
                (Language::En, "Both of you get an extra game."),
                (Language::Ru, "Вы оба получите дополнительную игру."),
            ]),
            button_text: LocalizedText::from([
                (Language::En, "Invite"),
                (Language::Ru, "Пригласить"),
                (Language::Es, "Invitar"),
            ]),
            target_url: "https://t.me/share/url?url=https%3A%2F%2Ft.me%2Fadrelay_game".to_string(),
            image_url: "/assets/ads/invite.webp".to_string(),
            duration_seconds: SECONDS_PER_CREATIVE,
            is_horizontal: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_are_valid() {
        let creatives = default_creatives();
        assert_eq!(creatives.len(), 3);
        assert!(creatives.iter().all(|c| c.validate().is_ok()));
        assert_eq!(CreativeEntry::total_duration(&creatives), Duration::from_secs(24));
    }

    #[test]
    fn test_every_title_is_fully_localized() {
        for creative in default_creatives() {
            for lang in Language::all() {
                assert!(!creative.title.get(*lang).is_empty(), "{} {lang}", creative.name);
            }
        }
    }
}
