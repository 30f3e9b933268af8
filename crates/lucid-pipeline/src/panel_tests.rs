    use super::*;
    use crate::error::ProviderFailure;

    fn plain() -> Selection {
        Selection {
            text: "paradigm shift".to_string(),
            bounding_box: Rect::new(100.0, 100.0, 200.0, 120.0),
            is_code: false,
        }
    }

    fn code() -> Selection {
        Selection {
            text: "function foo() {}".to_string(),
            bounding_box: Rect::new(100.0, 100.0, 200.0, 120.0),
            is_code: true,
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0)
    }

    #[test]
    fn test_parse_terminal_with_language() {
        let content = parse_terminal("Use const.\n```javascript\nconst foo = () => {};\n```\nShorter.");
        assert_eq!(content.improved_code.as_deref(), Some("const foo = () => {};"));
        assert_eq!(content.explanation, "Use const.\n\nShorter.");
    }

    #[test]
    fn test_parse_terminal_without_language() {
        let content = parse_terminal("```\nx = 1\n```");
        assert_eq!(content.improved_code.as_deref(), Some("x = 1"));
        assert_eq!(content.explanation, "");
    }

    #[test]
    fn test_parse_terminal_without_block() {
        let content = parse_terminal("  Looks fine as is. ");
        assert_eq!(content.improved_code, None);
        assert_eq!(content.explanation, "Looks fine as is.");
    }

    #[test]
    fn test_parse_terminal_first_block_only() {
        let content = parse_terminal("```a\none\n``` and ```b\ntwo\n```");
        assert_eq!(content.improved_code.as_deref(), Some("one"));
        assert!(content.explanation.contains("two"));
    }

    #[test]
    fn test_kind_follows_classification() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());
        assert_eq!(panel.visible(), Some(PanelKind::Popup));
        assert_eq!(panel.position(), Some(PanelPosition { x: 210.0, y: 100.0 }));

        panel.show(&code(), &viewport());
        assert_eq!(panel.visible(), Some(PanelKind::Terminal));
        assert_eq!(panel.position(), None);
        assert_eq!(panel.bounds(), Some(Rect::new(600.0, 0.0, 1000.0, 800.0)));
    }

    #[test]
    fn test_loading_view_badges() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());
        assert_eq!(
            panel.view(&RequestState::Loading),
            PanelView::Loading {
                kind: PanelKind::Popup,
                badge: "Text".to_string()
            }
        );

        panel.show(&code(), &viewport());
        assert_eq!(
            panel.view(&RequestState::Loading),
            PanelView::Loading {
                kind: PanelKind::Terminal,
                badge: "Code".to_string()
            }
        );
    }

    #[test]
    fn test_hidden_view_ignores_state() {
        let panel = PanelStateMachine::default();
        assert_eq!(
            panel.view(&RequestState::Success(Explanation::new("x"))),
            PanelView::Hidden
        );
    }

    #[test]
    fn test_popup_success_offers_search_and_analysis() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());
        let state = RequestState::Success(Explanation::new("A fundamental change."));
        assert_eq!(
            panel.view(&state),
            PanelView::Explanation {
                text: "A fundamental change.".to_string(),
                improvements: None,
                actions: vec![Action::SearchWeb, Action::OpenAnalysis],
            }
        );
    }

    #[test]
    fn test_terminal_success_splits_code() {
        let mut panel = PanelStateMachine::default();
        panel.show(&code(), &viewport());
        let state = RequestState::Success(
            Explanation::new("Declares a function foo.")
                .with_improvements("Prefer an arrow function:\n```js\nconst foo = () => {};\n```"),
        );
        assert_eq!(
            panel.view(&state),
            PanelView::Terminal {
                improved_code: Some("const foo = () => {};".to_string()),
                explanation: "Declares a function foo.\n\nPrefer an arrow function:".to_string(),
                width: 400.0,
                actions: Vec::new(),
            }
        );
    }

    #[test]
    fn test_error_views() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());

        let network = RequestState::Error(ExplainError::Network("refused".into()));
        let PanelView::Error { message, retry } = panel.view(&network) else {
            panic!("expected an error view");
        };
        assert!(message.starts_with("Could not connect to the server"));
        assert!(retry);
        assert_eq!(panel.actions(&network), vec![Action::Retry]);

        let malformed = RequestState::Error(ExplainError::MalformedResponse("bad".into()));
        assert!(matches!(panel.view(&malformed), PanelView::Error { retry: false, .. }));

        let quota = RequestState::Error(ExplainError::Provider(ProviderFailure::Quota));
        assert!(matches!(panel.view(&quota), PanelView::Error { retry: true, .. }));

        let unconfigured = RequestState::Error(ExplainError::NeedsConfiguration);
        assert_eq!(panel.view(&unconfigured), PanelView::NeedsCredentials);
    }

    #[test]
    fn test_click_inside_popup_is_ignored() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());
        assert!(!panel.on_click(250.0, 150.0));
        assert!(!panel.grace_pending());
    }

    #[test]
    fn test_click_outside_waits_for_grace() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());

        assert!(panel.on_click(900.0, 700.0));
        assert!(panel.is_visible());

        // Selection still present: stays open.
        assert!(!panel.on_grace_elapsed(false));
        assert!(panel.is_visible());

        assert!(panel.on_click(900.0, 700.0));
        assert!(panel.on_grace_elapsed(true));
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_grace_without_click_does_nothing() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());
        assert!(!panel.on_grace_elapsed(true));
        assert!(panel.is_visible());
    }

    #[test]
    fn test_click_does_not_dismiss_terminal() {
        let mut panel = PanelStateMachine::default();
        panel.show(&code(), &viewport());
        assert!(!panel.on_click(10.0, 10.0));
        assert!(!panel.on_grace_elapsed(true));
        assert!(panel.is_visible());
    }

    #[test]
    fn test_escape_hides() {
        let mut panel = PanelStateMachine::default();
        panel.show(&code(), &viewport());
        assert!(!panel.on_key(&Key::Other("a".into())));
        assert!(panel.on_key(&Key::Escape));
        assert!(!panel.is_visible());
        assert!(!panel.on_key(&Key::Escape));
    }

    #[test]
    fn test_terminal_width_bounds() {
        let mut panel = PanelStateMachine::default();
        panel.show(&code(), &viewport());
        assert_eq!(panel.terminal_width(), 400.0);

        assert!(!panel.resize_terminal(250.0, &viewport()));
        assert!(!panel.resize_terminal(900.0, &viewport()));
        assert_eq!(panel.terminal_width(), 400.0);

        assert!(panel.resize_terminal(300.0, &viewport()));
        assert!(panel.resize_terminal(800.0, &viewport()));
        assert_eq!(panel.terminal_width(), 800.0);
        assert_eq!(panel.bounds(), Some(Rect::new(200.0, 0.0, 1000.0, 800.0)));
    }

    #[test]
    fn test_reposition_on_resize() {
        let mut panel = PanelStateMachine::default();
        panel.show(&plain(), &viewport());
        panel.reposition(&plain(), &Viewport::new(400.0, 800.0));
        assert_eq!(panel.position(), Some(PanelPosition { x: 10.0, y: 100.0 }));
    }

    #[test]
    fn test_terminal_display_without_code() {
        let view = PanelView::Terminal {
            improved_code: None,
            explanation: "Fine as is.".to_string(),
            width: 400.0,
            actions: Vec::new(),
        };
        assert!(view.to_string().contains("No code improvements suggested"));
    }

    #[test]
    fn test_search_url_encodes_prompt_and_text() {
        assert_eq!(
            search_url("paradigm shift"),
            "https://gemini.google.com/app?text=Give+explanation%2Fsolution+in+detail%3A%0A%0Aparadigm+shift"
        );
        assert!(search_url("a&b=c").ends_with("a%26b%3Dc"));
    }
