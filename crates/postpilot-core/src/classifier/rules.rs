//! Priority-ordered detection rules for both target apps.
//!
//! Ordering is load-bearing: overlay and terminal-error rules come first
//! because they can appear on top of any other screen, then progress and
//! success screens, then the main flow in flow order. The first rule to reach
//! the confidence threshold wins, so earlier rules always take overlaps.
//!
//! Weights favor human-visible strings. Resource-id fragments get small boost
//! weights only: both apps reassign identifiers between builds, while the
//! on-screen wording survives.

use super::signal::Signal;
use crate::screen::ScreenType;
use crate::screen::TargetApp;

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub screen: ScreenType,
    pub name: &'static str,
    /// Ceiling for the additive score of this rule.
    pub cap: f32,
    pub signals: &'static [Signal],
}

pub fn rules_for(app: TargetApp) -> &'static [Rule] {
    match app {
        TargetApp::TikTok => TIKTOK_RULES,
        TargetApp::Instagram => INSTAGRAM_RULES,
    }
}

static TIKTOK_RULES: &[Rule] = &[
    // -- overlays and terminal errors ------------------------------------
    Rule {
        screen: ScreenType::PermissionPrompt,
        name: "tiktok_permission_prompt",
        cap: 0.95,
        signals: &[
            Signal::all_text("allow tiktok to access", 0.45, "allow-access"),
            Signal::text_exact("while using the app", 0.35, "while-using"),
            Signal::text_exact("don't allow", 0.35, "dont-allow"),
            Signal::all_text("notifications", 0.15, "notifications"),
            Signal::all_text("allow", 0.20, "allow"),
        ],
    },
    Rule {
        screen: ScreenType::UpdatePrompt,
        name: "tiktok_update_prompt",
        cap: 0.90,
        signals: &[
            Signal::all_text("new version", 0.40, "new-version"),
            Signal::all_text("update now", 0.40, "update-now"),
            Signal::text_exact("update", 0.25, "update-button"),
            Signal::text_exact("later", 0.20, "later"),
            Signal::resource_id("upgrade", 0.10, "id-upgrade"),
        ],
    },
    Rule {
        screen: ScreenType::InterstitialPromo,
        name: "tiktok_interstitial_promo",
        cap: 0.85,
        signals: &[
            Signal::text_exact("not now", 0.40, "not-now"),
            Signal::text_exact("maybe later", 0.35, "maybe-later"),
            Signal::text_exact("no thanks", 0.35, "no-thanks"),
            Signal::all_text("follow your friends", 0.30, "follow-friends"),
            Signal::all_text("turn on notifications", 0.35, "notify-promo"),
            Signal::all_text("got it", 0.25, "got-it"),
        ],
    },
    Rule {
        screen: ScreenType::Verification,
        name: "tiktok_verification",
        cap: 0.95,
        signals: &[
            Signal::all_text("verify to continue", 0.45, "verify-continue"),
            Signal::all_text("security check", 0.40, "security-check"),
            Signal::all_text("captcha", 0.40, "captcha"),
            Signal::all_text("drag the slider", 0.35, "slider"),
            Signal::all_text("verify", 0.20, "verify"),
            Signal::resource_id("captcha", 0.15, "id-captcha"),
        ],
    },
    Rule {
        screen: ScreenType::AccountBanned,
        name: "tiktok_account_banned",
        cap: 0.98,
        signals: &[
            Signal::all_text("account was permanently banned", 0.60, "banned-permanent"),
            Signal::all_text("banned", 0.40, "banned"),
            Signal::all_text("suspended", 0.40, "suspended"),
            Signal::all_text("community guidelines", 0.35, "guidelines"),
            Signal::all_text("appeal", 0.20, "appeal"),
        ],
    },
    Rule {
        screen: ScreenType::LoginRequired,
        name: "tiktok_login_required",
        cap: 0.90,
        signals: &[
            Signal::text_exact("log in", 0.35, "log-in"),
            Signal::text_exact("sign up", 0.30, "sign-up"),
            Signal::all_text("use phone / email / username", 0.30, "phone-email"),
            Signal::all_text("continue with google", 0.25, "google"),
            Signal::all_text("continue with facebook", 0.20, "facebook"),
            Signal::resource_id("login", 0.10, "id-login"),
        ],
    },
    // -- progress and terminal success -----------------------------------
    Rule {
        screen: ScreenType::UploadProgress,
        name: "tiktok_upload_progress",
        cap: 0.90,
        signals: &[
            Signal::all_text("uploading", 0.40, "uploading"),
            Signal::all_text("posting", 0.35, "posting"),
            Signal::percent(0.30, "percent"),
            Signal::all_text("don't close", 0.20, "dont-close"),
        ],
    },
    Rule {
        screen: ScreenType::PostSuccess,
        name: "tiktok_post_success",
        cap: 0.95,
        signals: &[
            Signal::all_text("your video has been posted", 0.55, "posted-banner"),
            Signal::all_text("video is now live", 0.45, "live-banner"),
            Signal::text_exact("view", 0.20, "view"),
            Signal::text_exact("done", 0.20, "done"),
        ],
    },
    // Viewing one's own just-posted video: owner-only affordances stand in
    // for an explicit confirmation banner.
    Rule {
        screen: ScreenType::PostSuccess,
        name: "tiktok_own_video_page",
        cap: 0.90,
        signals: &[
            Signal::all_text("delete", 0.30, "delete"),
            Signal::all_text("promote", 0.30, "promote"),
            Signal::all_text("analytics", 0.25, "analytics"),
            Signal::all_text("privacy settings", 0.20, "privacy"),
            Signal::all_text("pin", 0.15, "pin"),
        ],
    },
    // -- main flow, in flow order ----------------------------------------
    Rule {
        screen: ScreenType::HomeFeed,
        name: "tiktok_home_feed",
        cap: 0.95,
        signals: &[
            Signal::text_exact("for you", 0.35, "for-you"),
            Signal::text_exact("following", 0.25, "following"),
            Signal::desc_exact("create", 0.30, "create-button"),
            Signal::desc_exact("home", 0.20, "home-tab"),
            Signal::text_exact("friends", 0.15, "friends-tab"),
            Signal::resource_id("tab_bar", 0.10, "id-tab-bar"),
        ],
    },
    Rule {
        screen: ScreenType::CreateMenu,
        name: "tiktok_create_camera",
        cap: 0.90,
        signals: &[
            Signal::all_text("add sound", 0.40, "add-sound"),
            Signal::desc_exact("upload", 0.30, "upload-button"),
            Signal::text_exact("templates", 0.20, "templates"),
            Signal::text_exact("60s", 0.15, "mode-60s"),
            Signal::desc_contains("flip", 0.15, "flip-camera"),
            Signal::resource_id("record", 0.10, "id-record"),
        ],
    },
    Rule {
        screen: ScreenType::GalleryPicker,
        name: "tiktok_gallery_picker",
        cap: 0.90,
        signals: &[
            Signal::text_exact("recents", 0.30, "recents"),
            Signal::all_text("select multiple", 0.30, "select-multiple"),
            Signal::text_exact("videos", 0.25, "videos-tab"),
            Signal::text_exact("all", 0.10, "all-tab"),
            Signal::text_exact("next", 0.15, "next-button"),
            Signal::resource_id("album", 0.10, "id-album"),
        ],
    },
    Rule {
        screen: ScreenType::Editor,
        name: "tiktok_editor",
        cap: 0.90,
        signals: &[
            Signal::text_exact("next", 0.30, "next-button"),
            Signal::all_text("add text", 0.20, "add-text"),
            Signal::text_exact("stickers", 0.20, "stickers"),
            Signal::text_exact("effects", 0.20, "effects"),
            Signal::text_exact("filters", 0.15, "filters"),
            Signal::resource_id("edit", 0.10, "id-edit"),
        ],
    },
    Rule {
        screen: ScreenType::CaptionEntry,
        name: "tiktok_caption_entry",
        cap: 0.95,
        signals: &[
            Signal::all_text("describe your post", 0.45, "caption-hint"),
            Signal::all_text("add description", 0.35, "caption-hint-alt"),
            Signal::text_exact("post", 0.25, "post-button"),
            Signal::all_text("who can view this post", 0.25, "privacy-row"),
            Signal::all_text("# hashtags", 0.15, "hashtags"),
            Signal::all_text("@ mention", 0.15, "mention"),
            Signal::resource_id("publish", 0.10, "id-publish"),
        ],
    },
];

static INSTAGRAM_RULES: &[Rule] = &[
    // -- overlays and terminal errors ------------------------------------
    Rule {
        screen: ScreenType::PermissionPrompt,
        name: "instagram_permission_prompt",
        cap: 0.95,
        signals: &[
            Signal::all_text("allow instagram to access", 0.45, "allow-access"),
            Signal::text_exact("while using the app", 0.35, "while-using"),
            Signal::text_exact("don't allow", 0.35, "dont-allow"),
            Signal::all_text("photos and videos", 0.20, "photos-videos"),
            Signal::all_text("allow", 0.20, "allow"),
        ],
    },
    Rule {
        screen: ScreenType::UpdatePrompt,
        name: "instagram_update_prompt",
        cap: 0.90,
        signals: &[
            Signal::all_text("update instagram", 0.45, "update-app"),
            Signal::all_text("new version", 0.35, "new-version"),
            Signal::text_exact("update", 0.25, "update-button"),
            Signal::text_exact("not now", 0.15, "not-now"),
        ],
    },
    Rule {
        screen: ScreenType::InterstitialPromo,
        name: "instagram_interstitial_promo",
        cap: 0.85,
        signals: &[
            Signal::text_exact("not now", 0.40, "not-now"),
            Signal::text_exact("maybe later", 0.35, "maybe-later"),
            Signal::text_exact("no thanks", 0.35, "no-thanks"),
            Signal::all_text("add to your story", 0.30, "story-promo"),
            Signal::all_text("turn on notifications", 0.35, "notify-promo"),
            Signal::all_text("see suggestions", 0.25, "suggestions"),
        ],
    },
    Rule {
        screen: ScreenType::Verification,
        name: "instagram_verification",
        cap: 0.95,
        signals: &[
            Signal::all_text("confirm it's you", 0.45, "confirm-you"),
            Signal::all_text("security check", 0.40, "security-check"),
            Signal::all_text("captcha", 0.40, "captcha"),
            Signal::all_text("suspicious activity", 0.35, "suspicious"),
            Signal::all_text("verify", 0.20, "verify"),
        ],
    },
    Rule {
        screen: ScreenType::AccountBanned,
        name: "instagram_account_disabled",
        cap: 0.98,
        signals: &[
            Signal::all_text("your account has been disabled", 0.60, "disabled-banner"),
            Signal::all_text("disabled", 0.35, "disabled"),
            Signal::all_text("suspended", 0.40, "suspended"),
            Signal::all_text("violating our terms", 0.35, "terms"),
            Signal::all_text("request a review", 0.20, "review"),
        ],
    },
    Rule {
        screen: ScreenType::LoginRequired,
        name: "instagram_login_required",
        cap: 0.90,
        signals: &[
            Signal::text_exact("log in", 0.35, "log-in"),
            Signal::text_exact("sign up", 0.30, "sign-up"),
            Signal::all_text("forgot password?", 0.30, "forgot-password"),
            Signal::all_text("continue with facebook", 0.25, "facebook"),
            Signal::resource_id("login", 0.10, "id-login"),
        ],
    },
    // -- progress and terminal success -----------------------------------
    Rule {
        screen: ScreenType::UploadProgress,
        name: "instagram_upload_progress",
        cap: 0.90,
        signals: &[
            Signal::all_text("uploading", 0.35, "uploading"),
            Signal::all_text("sharing", 0.35, "sharing"),
            Signal::percent(0.30, "percent"),
            Signal::all_text("finishing up", 0.30, "finishing"),
        ],
    },
    Rule {
        screen: ScreenType::PostSuccess,
        name: "instagram_post_success",
        cap: 0.95,
        signals: &[
            Signal::all_text("your reel has been shared", 0.55, "shared-banner"),
            Signal::all_text("post shared", 0.45, "post-shared"),
            Signal::all_text("view reel", 0.30, "view-reel"),
            Signal::text_exact("done", 0.20, "done"),
        ],
    },
    Rule {
        screen: ScreenType::PostSuccess,
        name: "instagram_own_post_page",
        cap: 0.90,
        signals: &[
            Signal::all_text("view insights", 0.35, "insights"),
            Signal::all_text("boost", 0.30, "boost"),
            Signal::all_text("delete", 0.25, "delete"),
            Signal::all_text("edit", 0.15, "edit"),
        ],
    },
    // -- main flow, in flow order ----------------------------------------
    Rule {
        screen: ScreenType::HomeFeed,
        name: "instagram_home_feed",
        cap: 0.95,
        signals: &[
            Signal::text_exact("your story", 0.30, "your-story"),
            Signal::desc_exact("create", 0.30, "create-button"),
            Signal::desc_exact("new post", 0.30, "new-post"),
            Signal::desc_exact("home", 0.25, "home-tab"),
            Signal::desc_exact("reels", 0.20, "reels-tab"),
            Signal::resource_id("tab_bar", 0.10, "id-tab-bar"),
        ],
    },
    Rule {
        screen: ScreenType::CreateMenu,
        name: "instagram_create_sheet",
        cap: 0.90,
        signals: &[
            Signal::text_exact("new post", 0.35, "new-post"),
            Signal::text_exact("reel", 0.25, "reel-option"),
            Signal::text_exact("story", 0.20, "story-option"),
            Signal::text_exact("post", 0.20, "post-option"),
            Signal::text_exact("live", 0.15, "live-option"),
        ],
    },
    Rule {
        screen: ScreenType::GalleryPicker,
        name: "instagram_gallery_picker",
        cap: 0.90,
        signals: &[
            Signal::text_exact("recents", 0.30, "recents"),
            Signal::all_text("select multiple", 0.30, "select-multiple"),
            Signal::text_exact("gallery", 0.25, "gallery"),
            Signal::text_exact("new reel", 0.25, "new-reel-title"),
            Signal::desc_exact("next", 0.15, "next-button"),
        ],
    },
    Rule {
        screen: ScreenType::Editor,
        name: "instagram_editor",
        cap: 0.90,
        signals: &[
            Signal::all_text("add audio", 0.30, "add-audio"),
            Signal::desc_exact("next", 0.25, "next-button"),
            Signal::text_exact("effects", 0.20, "effects"),
            Signal::text_exact("stickers", 0.20, "stickers"),
            Signal::text_exact("edit video", 0.20, "edit-video"),
        ],
    },
    Rule {
        screen: ScreenType::CaptionEntry,
        name: "instagram_caption_entry",
        cap: 0.95,
        signals: &[
            Signal::all_text("write a caption", 0.45, "caption-hint"),
            Signal::text_exact("share", 0.30, "share-button"),
            Signal::all_text("tag people", 0.25, "tag-people"),
            Signal::all_text("add location", 0.20, "add-location"),
            Signal::resource_id("caption", 0.10, "id-caption"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn first_index_of(rules: &[Rule], screen: ScreenType) -> usize {
        rules
            .iter()
            .position(|r| r.screen == screen)
            .unwrap_or(usize::MAX)
    }

    #[test]
    fn overlays_and_terminals_precede_flow_screens() {
        for app in [TargetApp::TikTok, TargetApp::Instagram] {
            let rules = rules_for(app);
            let first_flow = rules
                .iter()
                .position(|r| !r.screen.is_overlay() && !r.screen.is_terminal())
                .unwrap();
            for rule in &rules[..first_flow] {
                assert!(
                    rule.screen.is_overlay() || rule.screen.is_terminal(),
                    "{} out of order",
                    rule.name
                );
            }
            assert!(
                first_index_of(rules, ScreenType::UploadProgress)
                    < first_index_of(rules, ScreenType::HomeFeed),
                "{}: progress must precede main flow",
                app
            );
        }
    }

    #[test]
    fn caps_and_weights_are_sane() {
        for app in [TargetApp::TikTok, TargetApp::Instagram] {
            for rule in rules_for(app) {
                assert!(rule.cap > 0.0 && rule.cap <= 1.0, "{} cap", rule.name);
                assert!(!rule.signals.is_empty(), "{} has no signals", rule.name);
                for signal in rule.signals {
                    assert!(
                        signal.weight > 0.0 && signal.weight <= rule.cap,
                        "{} signal {} weight",
                        rule.name,
                        signal.tag
                    );
                }
            }
        }
    }

    #[test]
    fn every_non_unknown_screen_has_a_rule() {
        use ScreenType::*;
        for app in [TargetApp::TikTok, TargetApp::Instagram] {
            let rules = rules_for(app);
            for screen in [
                HomeFeed,
                CreateMenu,
                GalleryPicker,
                Editor,
                CaptionEntry,
                UploadProgress,
                PostSuccess,
                PermissionPrompt,
                UpdatePrompt,
                InterstitialPromo,
                LoginRequired,
                Verification,
                AccountBanned,
            ] {
                assert!(
                    rules.iter().any(|r| r.screen == screen),
                    "{}: no rule for {}",
                    app,
                    screen
                );
            }
        }
    }
}
