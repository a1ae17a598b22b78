//! CLI output formatting tests.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use adrelay_core::{AdResult, PremiumStatus, ProviderInfo, ProviderKind, ProviderState};
    use adrelay_fetch::{CreativeFrame, ModalSpec};

    fn plain() -> TextFormatter {
        TextFormatter::new(false)
    }

    #[test]
    fn test_reward_result() {
        let result = AdResult::rewarded("carousel", "extra_game")
            .with_debug("3 creatives shown in 24s, language en");
        let text = plain().format_result(&result);

        assert!(text.starts_with("✓ Reward granted: extra_game (carousel at "));
        assert!(text.contains("language en"));
    }

    #[test]
    fn test_failure_result() {
        let result = AdResult::failure("carousel", "orientation change")
            .with_premium(PremiumStatus::none("No active subscription"));
        let text = plain().format_result(&result);

        assert!(text.starts_with("✗ No reward: orientation change"));
        assert!(text.contains("premium: No active subscription"));
    }

    #[test]
    fn test_skip_result() {
        let result = AdResult::premium_skip(PremiumStatus::forever("Lifetime"));
        let text = plain().format_result(&result);

        assert!(text.starts_with("↷ Skipped: premium user"));
        assert!(!text.contains("premium: "));
    }

    #[test]
    fn test_premium_lines() {
        let f = plain();
        assert_eq!(
            f.format_premium(&PremiumStatus::temporary(3, "Trial"), Some("42")),
            "★ User 42: temporary, 3 days left (Trial)"
        );
        assert_eq!(
            f.format_premium(&PremiumStatus::check_failed(), None),
            "? User -: no premium (Error checking premium status)"
        );
    }

    #[test]
    fn test_provider_line() {
        let info = ProviderInfo::new(
            ProviderKind::Adsgram,
            ProviderState::Failed("Script runtime unavailable".to_string()),
            false,
        );
        let line = plain().format_provider_line(&info, false);

        assert!(line.contains("adsgram"));
        assert!(line.contains("failed"));
        assert!(line.contains("Script runtime unavailable"));
    }

    #[test]
    fn test_frame_and_header() {
        let f = plain();
        let header = f.format_modal_header(&ModalSpec {
            provider: "carousel".to_string(),
            creative_count: 3,
            total_seconds: 24,
        });
        assert_eq!(header, "▶ Rewarded ad · 3 creatives · 24s");

        let frame = f.format_frame(&CreativeFrame {
            index: 1,
            name: "tournament".to_string(),
            title: "Weekly tournament".to_string(),
            description: String::new(),
            button_text: "Join".to_string(),
            target_url: "https://t.me/x".to_string(),
            image_url: String::new(),
            is_horizontal: true,
        });
        assert_eq!(frame, "[2] Weekly tournament\n    [ Join ] https://t.me/x");
    }

    #[test]
    fn test_colors_toggle() {
        let result = AdResult::failure("carousel", "orientation");
        assert!(TextFormatter::new(true).format_result(&result).contains("\x1b["));
        assert!(!plain().format_result(&result).contains("\x1b["));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use adrelay_core::PremiumStatus;

    #[test]
    fn test_premium_output_is_flat() {
        let json = JsonFormatter::new(false)
            .format_premium(&PremiumStatus::forever("Lifetime"), Some("42"))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["userId"], "42");
        assert_eq!(value["hasPremium"], true);
        assert_eq!(value["type"], "forever");
    }

    #[test]
    fn test_pretty_vs_compact() {
        let data = serde_json::json!({"a": 1});
        assert!(JsonFormatter::new(true).format(&data).unwrap().contains('\n'));
        assert_eq!(JsonFormatter::new(false).format(&data).unwrap(), r#"{"a":1}"#);
    }
}
