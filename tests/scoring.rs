use std::cell::RefCell;
use std::rc::Rc;

use lazy_static::lazy_static;

use eventually_tennis::event::store::{EventStoreExt, InMemory};
use eventually_tennis::event::EventStream;
use eventually_tennis::{Event, Game, Match, Player, Set};

const MATCH_ID: &str = "wimbledon-final";

lazy_static! {
    static ref SET_ONE: Event = Event::SetPlayerOne("6-0".to_owned());
    static ref SET_TWO: Event = Event::SetPlayerTwo("6-0".to_owned());
}

fn setup() -> (InMemory<String, Event>, String, String) {
    let stream = Match::stream_name_for(MATCH_ID);

    (InMemory::default(), MATCH_ID.to_owned(), stream)
}

fn announced_after(events: &[Event]) -> String {
    let reported = Rc::new(RefCell::new(String::new()));
    let mut game = Game::new();

    let score = Rc::clone(&reported);
    game.subscribe_to_score(move |s| *score.borrow_mut() = s.to_owned());

    for event in events {
        game.when(event);
    }

    let reported = reported.borrow().clone();
    reported
}

#[test]
fn a_game_with_no_points_is_love_all() {
    assert_eq!("love all", announced_after(&[]));
}

#[test]
fn player_one_wins_a_game_from_40_15() {
    use Event::{PlayerOneScored as P1, PlayerTwoScored as P2};

    assert_eq!("Game player one", announced_after(&[P1, P1, P1, P2, P1]));
}

#[test]
fn three_points_each_is_deuce() {
    use Event::{PlayerOneScored as P1, PlayerTwoScored as P2};

    assert_eq!("deuce", announced_after(&[P1, P2, P2, P2, P1, P1]));
}

#[test]
fn three_sets_in_a_row_win_the_match() -> anyhow::Result<()> {
    let (store, match_id, stream) = setup();

    store.write_all(stream.clone(), vec![SET_ONE.clone(), SET_ONE.clone(), SET_ONE.clone()])?;
    Match::new(&store, &match_id)?;

    assert_eq!(Some(Event::MatchPlayerOne), store.read_last(&stream)?);

    Ok(())
}

#[test]
fn the_match_is_won_once_the_third_set_is_written() -> anyhow::Result<()> {
    let (store, match_id, stream) = setup();

    store.write_all(stream.clone(), vec![SET_ONE.clone(), SET_TWO.clone(), SET_ONE.clone()])?;
    Match::new(&store, &match_id)?;

    let last = store.read_last(&stream)?;
    assert_eq!(None, last.and_then(|event| event.match_winner()));

    store.write(stream.clone(), SET_ONE.clone())?;

    // Nothing reacts to the write until the match is rebuilt.
    assert_eq!(Some(SET_ONE.clone()), store.read_last(&stream)?);

    Match::new(&store, &match_id)?;

    assert_eq!(Some(Event::MatchPlayerOne), store.read_last(&stream)?);

    Ok(())
}

#[test]
fn player_two_comes_back_from_two_sets_to_one() -> anyhow::Result<()> {
    let (store, match_id, stream) = setup();

    store.write_all(stream.clone(), vec![SET_ONE.clone(), SET_TWO.clone(), SET_ONE.clone()])?;
    Match::new(&store, &match_id)?;

    for _ in 0..2 {
        store.write(stream.clone(), SET_TWO.clone())?;
        Match::new(&store, &match_id)?;
    }

    let tennis_match = Match::new(&store, &match_id)?;

    assert_eq!(Some(Player::Two), tennis_match.winner());
    assert_eq!(Some(Event::MatchPlayerTwo), store.read_last(&stream)?);

    Ok(())
}

#[test]
fn alternating_sets_means_nobody_wins() -> anyhow::Result<()> {
    let (store, match_id, stream) = setup();

    let alternating: Vec<Event> = (0..4)
        .flat_map(|_| [SET_ONE.clone(), SET_TWO.clone()])
        .collect();

    store.write_all(stream.clone(), alternating)?;
    let tennis_match = Match::new(&store, &match_id)?;

    assert_eq!(None, tennis_match.winner());
    assert_eq!(Some(SET_TWO.clone()), store.read_last(&stream)?);

    Ok(())
}

#[test]
fn sets_won_feed_the_match() -> anyhow::Result<()> {
    let (store, match_id, stream) = setup();

    for _ in 0..3 {
        let mut points = EventStream::from(vec![Event::point_won_by(Player::Two); 24]);
        let set = Set::new(&mut points);

        let set_won = points
            .read_all()
            .iter()
            .find(|event| matches!(event, Event::SetPlayerOne(_) | Event::SetPlayerTwo(_)))
            .cloned()
            .expect("the set should have a winner");

        assert_eq!(Some(Player::Two), set.winner());
        assert_eq!(Event::SetPlayerTwo("0-6".to_owned()), set_won);

        store.write(stream.clone(), set_won)?;
    }

    let tennis_match = Match::new(&store, &match_id)?;

    assert_eq!(Some(Player::Two), tennis_match.winner());
    assert_eq!(3, tennis_match.sets().player_two);

    Ok(())
}
