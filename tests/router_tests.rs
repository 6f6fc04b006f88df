//! Message router integration tests.
//!
//! One test per routing rule: private mirror, mid-game silencing of
//! non-players, night devoicing, plain public delivery, and fail-fast
//! on unknown channels.

use lupine::core::{GameState, Settings, User, UserId};
use lupine::router::{
    MessageContext, Recipient, RouteError, RouteOptions, Router, Target, Visibility,
};

fn alice() -> User {
    User::new(UserId::new(1), "alice")
}

fn router() -> Router {
    Router::new().join("#village").join("#side")
}

fn idle_state() -> GameState {
    GameState::new(Settings::new("#village"), 42)
}

fn playing_state() -> GameState {
    let mut state = idle_state();
    state.add_player(alice());
    state.begin_day();
    state
}

#[test]
fn active_player_outside_game_phase_speaks_publicly() {
    let mut state = idle_state();
    state.add_player(alice());

    let delivery = router()
        .route(
            &alice(),
            &Target::Channel("#village".into()),
            &state,
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(delivery.recipient, Recipient::Channel("#village".into()));
    assert_eq!(delivery.mode, Visibility::Public);
    assert_eq!(delivery.prefix, None);
}

#[test]
fn active_player_speaks_publicly_during_day() {
    let state = playing_state();

    let delivery = router()
        .route(
            &alice(),
            &Target::Channel("#village".into()),
            &state,
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(delivery.mode, Visibility::Public);
}

#[test]
fn non_player_in_main_channel_is_forced_to_notice_mid_game() {
    let state = playing_state();
    let ghost = User::new(UserId::new(9), "ghost");

    let delivery = router()
        .route(
            &ghost,
            &Target::Channel("#village".into()),
            &state,
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(delivery.recipient, Recipient::User(UserId::new(9)));
    assert_eq!(delivery.mode, Visibility::Notice);
}

#[test]
fn non_player_speaks_freely_in_other_channels() {
    let state = playing_state();
    let ghost = User::new(UserId::new(9), "ghost");

    let delivery = router()
        .route(
            &ghost,
            &Target::Channel("#side".into()),
            &state,
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(delivery.recipient, Recipient::Channel("#side".into()));
    assert_eq!(delivery.mode, Visibility::Public);
}

#[test]
fn night_devoice_silences_even_active_players() {
    let mut state = GameState::new(
        Settings::new("#village").devoice_during_night(true),
        42,
    );
    state.add_player(alice());
    state.begin_night();

    let delivery = router()
        .route(
            &alice(),
            &Target::Channel("#village".into()),
            &state,
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(delivery.recipient, Recipient::User(UserId::new(1)));
    assert_eq!(delivery.mode, Visibility::Notice);
}

#[test]
fn night_without_devoice_policy_stays_public() {
    let mut state = idle_state();
    state.add_player(alice());
    state.begin_night();

    let delivery = router()
        .route(
            &alice(),
            &Target::Channel("#village".into()),
            &state,
            RouteOptions::default(),
        )
        .unwrap();

    assert_eq!(delivery.mode, Visibility::Public);
}

#[test]
fn reply_to_bot_target_is_private() {
    let state = playing_state();

    let delivery = router()
        .route(&alice(), &Target::Bot, &state, RouteOptions::default())
        .unwrap();

    assert_eq!(delivery.recipient, Recipient::User(UserId::new(1)));
    assert_eq!(delivery.mode, Visibility::Private);
}

#[test]
fn pm_mirrors_conversation_style() {
    // Public-context pm arrives as a notice; private-context pm as a
    // plain private message.
    let public_ctx = MessageContext::new(alice(), Target::Channel("#village".into()));
    assert_eq!(public_ctx.pm().mode, Visibility::Notice);
    assert_eq!(public_ctx.pm().recipient, Recipient::User(UserId::new(1)));

    let private_ctx = MessageContext::new(alice(), Target::Bot);
    assert_eq!(private_ctx.pm().mode, Visibility::Private);
}

#[test]
fn send_goes_where_the_message_came_from() {
    let ctx = MessageContext::new(alice(), Target::Channel("#village".into()));
    let delivery = ctx.send(&router()).unwrap();
    assert_eq!(delivery.recipient, Recipient::Channel("#village".into()));
    assert_eq!(delivery.mode, Visibility::Public);

    let ctx = MessageContext::new(alice(), Target::Bot);
    let delivery = ctx.send(&router()).unwrap();
    assert_eq!(delivery.recipient, Recipient::User(UserId::new(1)));
    assert_eq!(delivery.mode, Visibility::Private);
}

#[test]
fn reply_can_prefix_the_nick() {
    let state = playing_state();
    let ctx = MessageContext::new(alice(), Target::Channel("#village".into()));

    let delivery = ctx
        .reply(&router(), &state, RouteOptions::prefixed())
        .unwrap();
    assert_eq!(delivery.prefix.as_deref(), Some("alice: "));

    // Forced notices never carry the prefix.
    let ghost_ctx = MessageContext::new(
        User::new(UserId::new(9), "ghost"),
        Target::Channel("#village".into()),
    );
    let delivery = ghost_ctx
        .reply(&router(), &state, RouteOptions::prefixed())
        .unwrap();
    assert_eq!(delivery.prefix, None);
}

#[test]
fn unknown_channel_fails_fast() {
    let state = idle_state();

    let err = router()
        .route(
            &alice(),
            &Target::Channel("#elsewhere".into()),
            &state,
            RouteOptions::default(),
        )
        .unwrap_err();

    assert_eq!(err, RouteError::UnknownChannel("#elsewhere".into()));
}

#[test]
fn routing_is_pure() {
    let state = playing_state();
    let router = router();
    let target = Target::Channel("#village".into());

    let first = router
        .route(&alice(), &target, &state, RouteOptions::default())
        .unwrap();
    let second = router
        .route(&alice(), &target, &state, RouteOptions::default())
        .unwrap();

    assert_eq!(first, second);
}
