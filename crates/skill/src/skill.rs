//! Intent dispatch — turns host requests into spoken replies.

use std::sync::Arc;

use chrono::NaiveDate;
use lunchline_config::AppConfig;
use lunchline_core::clock::Clock;
use lunchline_core::cycle::spoken_date;
use lunchline_core::error::{Error, MenuError, Result};
use lunchline_core::feed::FeedSource;
use lunchline_core::menu::{CategoryMenu, StationTable};
use lunchline_core::session::SessionAttributes;
use lunchline_core::skill::{IntentRequest, OutputSpeech, RequestKind, SkillRequest, SkillResponse};
use lunchline_menu::{MenuFeed, parse_menu, parse_requested_date, resolve_cycle_index};
use tracing::{info, warn};

use crate::composer::{MORE_PROMPT, paragraphs};
use crate::disclosure::{self, DialogSession, Reveal};

/// Slot carrying the requested date.
pub const SLOT_DAY: &str = "day";

const ASK_DAY: &str = "Which day do you want?";

/// Names the skill uses when talking about itself.
#[derive(Debug, Clone)]
pub struct Wording {
    pub skill_name: String,
    pub school_name: String,
    pub provider_name: String,
}

impl Wording {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            skill_name: config.skill_name.clone(),
            school_name: config.school_name.clone(),
            provider_name: config.provider_name.clone(),
        }
    }

    fn help(&self) -> String {
        format!(
            "With {}, you can get the menu {} is serving at {}. \
             For example, you could say today, tomorrow, or a specific date like October seventh. \
             Now, which day do you want?",
            self.skill_name, self.provider_name, self.school_name
        )
    }

    fn welcome(&self) -> String {
        format!("{}. For which day do you want the menu?", self.skill_name)
    }

    fn connection_problem(&self) -> String {
        format!(
            "There is a problem connecting to {} at this time. Please try again later.",
            self.provider_name
        )
    }
}

impl Default for Wording {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// What the user asked for, by intent name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    GetMenu,
    More,
    Help,
    Goodbye,
}

impl Action {
    fn from_intent(name: &str) -> Option<Self> {
        match name {
            "GetMenuIntent" | "GetFirstEventIntent" => Some(Action::GetMenu),
            "GetNextEventIntent" | "AMAZON.NextIntent" | "AMAZON.MoreIntent"
            | "AMAZON.YesIntent" => Some(Action::More),
            "AMAZON.HelpIntent" => Some(Action::Help),
            "AMAZON.StopIntent" | "AMAZON.CancelIntent" | "AMAZON.NoIntent" => {
                Some(Action::Goodbye)
            }
            _ => None,
        }
    }
}

/// The lunch menu skill.
pub struct LunchSkill {
    feed: Arc<dyn FeedSource>,
    clock: Arc<dyn Clock>,
    stations: StationTable,
    wording: Wording,
}

impl LunchSkill {
    pub fn new(feed: Arc<dyn FeedSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            feed,
            clock,
            stations: StationTable::default(),
            wording: Wording::default(),
        }
    }

    /// Build a skill with the configured station table and names.
    pub fn from_config(
        config: &AppConfig,
        feed: Arc<dyn FeedSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(feed, clock)
            .with_stations(config.stations.table())
            .with_wording(Wording::from_config(config))
    }

    pub fn with_stations(mut self, stations: StationTable) -> Self {
        self.stations = stations;
        self
    }

    pub fn with_wording(mut self, wording: Wording) -> Self {
        self.wording = wording;
        self
    }

    /// Dispatch one request. Lifecycle requests produce no reply.
    pub async fn handle(
        &self,
        request: &SkillRequest,
        attributes: &mut SessionAttributes,
    ) -> Result<Option<SkillResponse>> {
        match &request.kind {
            RequestKind::SessionStarted => {
                self.on_session_started(request);
                Ok(None)
            }
            RequestKind::Launch => Ok(Some(self.on_launch(request))),
            RequestKind::Intent(intent) => {
                self.on_intent(request, intent, attributes).await.map(Some)
            }
            RequestKind::SessionEnded => {
                self.on_session_ended(request, attributes);
                Ok(None)
            }
        }
    }

    pub fn on_session_started(&self, request: &SkillRequest) {
        info!(request_id = %request.request_id, session_id = %request.session_id, "Session started");
    }

    pub fn on_launch(&self, request: &SkillRequest) -> SkillResponse {
        info!(request_id = %request.request_id, session_id = %request.session_id, "Launch");
        self.welcome()
    }

    pub async fn on_intent(
        &self,
        request: &SkillRequest,
        intent: &IntentRequest,
        attributes: &mut SessionAttributes,
    ) -> Result<SkillResponse> {
        info!(
            request_id = %request.request_id,
            session_id = %request.session_id,
            intent = %intent.name,
            "Intent"
        );

        let action = Action::from_intent(&intent.name)
            .ok_or_else(|| Error::Internal(format!("Invalid intent: {}", intent.name)))?;

        match action {
            Action::GetMenu => self.lookup(intent.slot(SLOT_DAY), attributes).await,
            Action::More => self.more(attributes),
            Action::Help => Ok(SkillResponse::ask(
                OutputSpeech::PlainText(self.wording.help()),
                ASK_DAY,
            )),
            Action::Goodbye => {
                DialogSession::clear(attributes);
                Ok(SkillResponse::tell(OutputSpeech::PlainText("Goodbye".into())))
            }
        }
    }

    pub fn on_session_ended(&self, request: &SkillRequest, attributes: &mut SessionAttributes) {
        info!(request_id = %request.request_id, session_id = %request.session_id, "Session ended");
        attributes.clear();
    }

    fn welcome(&self) -> SkillResponse {
        SkillResponse::ask(
            OutputSpeech::PlainText(self.wording.welcome()),
            self.wording.help(),
        )
    }

    /// A fresh date lookup: resolve, fetch, parse, reveal entrees.
    async fn lookup(
        &self,
        day: Option<&str>,
        attributes: &mut SessionAttributes,
    ) -> Result<SkillResponse> {
        let menu = match parse_requested_date(day, self.clock.today()) {
            Ok(date) => self.load_menu(date).await.map(|menu| (date, menu)),
            Err(e) => Err(e),
        };

        let (date, menu) = match menu {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Menu lookup failed");
                DialogSession::clear(attributes);
                return Ok(self.error_response(&e));
            }
        };

        let has_entrees = menu.has_entrees();
        let reveal = disclosure::start(attributes, date, menu)?;
        if has_entrees {
            Ok(reveal_response(reveal))
        } else {
            let err = MenuError::NoEntreesFound {
                date: spoken_date(date),
            };
            warn!(error = %err, "Menu has no entrees");
            Ok(self.error_response(&err).with_card(reveal.card_title, reveal.rendered.card_text))
        }
    }

    /// Fetch and parse the menu for `date`.
    pub async fn load_menu(&self, date: NaiveDate) -> std::result::Result<CategoryMenu, MenuError> {
        let bytes = self.feed.fetch_raw().await?;
        let feed = MenuFeed::from_bytes(&bytes)?;
        let index = resolve_cycle_index(feed.anchor_date(), date, feed.cycle_length())?;
        parse_menu(&feed, index, &self.stations)
    }

    /// "More": reveal the next category, or start over if nothing is in progress.
    fn more(&self, attributes: &mut SessionAttributes) -> Result<SkillResponse> {
        match disclosure::advance(attributes)? {
            Some(reveal) => Ok(reveal_response(reveal)),
            None => {
                info!(error = %MenuError::InvalidDialogState, "Treating as a fresh start");
                DialogSession::clear(attributes);
                Ok(self.welcome())
            }
        }
    }

    /// The spoken reply for a failed turn.
    pub fn error_response(&self, err: &MenuError) -> SkillResponse {
        let ask_again = |text: String| {
            SkillResponse::ask(OutputSpeech::ssml(paragraphs([text.as_str()])), ASK_DAY)
        };

        match err {
            MenuError::DateUnparsable { .. } => ask_again(
                "Sorry, I didn't understand that date. Please say a date like October seventh."
                    .into(),
            ),
            MenuError::DateOutOfCycleRange { date } => ask_again(format!(
                "There is no menu information for {date}. Please ask about another day."
            )),
            MenuError::NonServiceDay { date } => ask_again(format!(
                "Food is not served on {date}. Please ask about another day."
            )),
            MenuError::FeedUnavailable(_) | MenuError::FeedMalformed(_) => {
                SkillResponse::tell(OutputSpeech::ssml(self.wording.connection_problem()))
            }
            MenuError::NoEntreesFound { date } => SkillResponse::ask(
                OutputSpeech::ssml(paragraphs([
                    format!("No entrees were found for {date}.").as_str(),
                    MORE_PROMPT,
                ])),
                MORE_PROMPT,
            ),
            MenuError::InvalidDialogState => self.welcome(),
        }
    }
}

fn reveal_response(reveal: Reveal) -> SkillResponse {
    let speech = OutputSpeech::ssml(&reveal.rendered.speech);
    let response = if reveal.rendered.continues {
        SkillResponse::ask(speech, MORE_PROMPT)
    } else {
        SkillResponse::tell(speech)
    };
    response.with_card(reveal.card_title, reveal.rendered.card_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunchline_core::clock::FixedClock;
    use lunchline_core::error::FeedError;
    use lunchline_core::menu::Category;
    use lunchline_core::session::SessionId;
    use lunchline_feed::StaticFeedSource;
    use serde_json::{Value, json};

    // 2025-09-01T00:00:00Z, a Monday
    const ANCHOR_SECS: i64 = 1_756_684_800;

    fn entries(labels: &[&str]) -> Value {
        Value::Array(labels.iter().map(|l| json!({"a": l})).collect())
    }

    /// Two-week feed; every weekday serves the same stations.
    fn feed_bytes() -> Vec<u8> {
        let day = json!([[], [
            entries(&["Tomato Soup"]),
            [],
            entries(&["Turkey Club"]),
            entries(&["Mac & Cheese", "Grilled Chicken"]),
            entries(&["Garden Salad"]),
            [], [], [],
            entries(&["Apple Crisp"]),
        ]]);
        let week = json!([[], day, day, day, day, day, []]);
        serde_json::to_vec(&json!({
            "menuList": [{}, {"menuFirstDate": ANCHOR_SECS}],
            "menu": {"menu": {"items": [[], week, week]}}
        }))
        .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn skill_with(source: StaticFeedSource, today: &str) -> LunchSkill {
        LunchSkill::new(Arc::new(source), Arc::new(FixedClock(date(today))))
    }

    fn skill() -> LunchSkill {
        skill_with(StaticFeedSource::new(feed_bytes()), "2025-09-08")
    }

    fn intent(name: &str) -> SkillRequest {
        SkillRequest::intent(SessionId::from("s1"), IntentRequest::new(name))
    }

    fn menu_for(day: &str) -> SkillRequest {
        SkillRequest::intent(
            SessionId::from("s1"),
            IntentRequest::new("GetMenuIntent").with_slot(SLOT_DAY, day),
        )
    }

    async fn reply(skill: &LunchSkill, req: SkillRequest, attrs: &mut SessionAttributes) -> SkillResponse {
        skill.handle(&req, attrs).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn launch_welcomes() {
        let mut attrs = SessionAttributes::new();
        let req = SkillRequest::new(SessionId::from("s1"), RequestKind::Launch);
        let resp = reply(&skill(), req, &mut attrs).await;
        assert_eq!(
            resp.speech.text(),
            "Stone Ridge Lunch. For which day do you want the menu?"
        );
        assert!(!resp.should_end_session);
    }

    #[tokio::test]
    async fn lookup_reveals_entrees() {
        let mut attrs = SessionAttributes::new();
        let resp = reply(&skill(), menu_for("2025-09-09"), &mut attrs).await;

        assert!(resp.speech.text().starts_with("<speak><p>For Tuesday September 9 2025, Entrees</p>"));
        assert!(resp.speech.text().contains("Mac and Cheese"));
        assert!(!resp.should_end_session);
        let card = resp.card.unwrap();
        assert_eq!(card.title, "Menu for September 2025-09-09");
        assert!(card.content.contains("Mac and Cheese\nGrilled Chicken"));
        assert!(DialogSession::load(&attrs).is_some());
    }

    #[tokio::test]
    async fn absent_day_means_today() {
        let mut attrs = SessionAttributes::new();
        let resp = reply(&skill(), intent("GetMenuIntent"), &mut attrs).await;
        assert!(resp.speech.text().contains("Monday September 8 2025"));
    }

    #[tokio::test]
    async fn full_walk_through_categories() {
        let skill = skill();
        let mut attrs = SessionAttributes::new();
        reply(&skill, menu_for("2025-09-08"), &mut attrs).await;

        let expected = ["Soups", "Salads", "Deli", "Fruit and Dessert"];
        for (i, header) in expected.iter().enumerate() {
            let resp = reply(&skill, intent("AMAZON.YesIntent"), &mut attrs).await;
            assert!(resp.speech.text().contains(header), "{header}");
            let last = i == expected.len() - 1;
            assert_eq!(resp.should_end_session, last);
            assert_eq!(resp.speech.text().contains(MORE_PROMPT), !last);
        }

        // A fifth "more" starts over.
        let resp = reply(&skill, intent("AMAZON.YesIntent"), &mut attrs).await;
        assert!(resp.speech.text().contains("For which day"));
    }

    #[tokio::test]
    async fn more_without_dialog_welcomes() {
        let mut attrs = SessionAttributes::new();
        let resp = reply(&skill(), intent("GetNextEventIntent"), &mut attrs).await;
        assert!(resp.speech.text().contains("For which day do you want the menu?"));
        assert!(!resp.should_end_session);
    }

    #[tokio::test]
    async fn unparsable_date_asks_to_rephrase() {
        let mut attrs = SessionAttributes::new();
        let resp = reply(&skill(), menu_for("the ides of march"), &mut attrs).await;
        assert!(resp.speech.text().contains("didn't understand that date"));
        assert!(!resp.should_end_session);
        assert!(DialogSession::load(&attrs).is_none());
    }

    #[tokio::test]
    async fn weekend_and_out_of_range_are_distinct() {
        let skill = skill();
        let mut attrs = SessionAttributes::new();

        let saturday = reply(&skill, menu_for("2025-09-06"), &mut attrs).await;
        assert!(saturday.speech.text().contains("Food is not served on Saturday September 6 2025"));

        let later = reply(&skill, menu_for("2026-01-01"), &mut attrs).await;
        assert!(later.speech.text().contains("no menu information for Thursday January 1 2026"));
        assert_ne!(saturday.speech, later.speech);
    }

    #[tokio::test]
    async fn empty_feed_is_connection_problem() {
        let source = StaticFeedSource::new(Vec::new());
        let skill = skill_with(source, "2025-09-08");
        let mut attrs = SessionAttributes::new();

        let resp = reply(&skill, menu_for("2025-09-08"), &mut attrs).await;
        assert!(resp.speech.text().contains("problem connecting to Sage Dining"));
        assert!(resp.should_end_session);
        assert!(DialogSession::load(&attrs).is_none());
    }

    #[tokio::test]
    async fn transport_failure_matches_empty_feed() {
        let failing = skill_with(
            StaticFeedSource::failing(FeedError::Timeout("10s".into())),
            "2025-09-08",
        );
        let empty = skill_with(StaticFeedSource::new(Vec::new()), "2025-09-08");

        let mut attrs = SessionAttributes::new();
        let a = reply(&failing, menu_for("2025-09-08"), &mut attrs).await;
        let b = reply(&empty, menu_for("2025-09-08"), &mut attrs).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn failed_lookup_drops_previous_dialog() {
        let skill = skill();
        let mut attrs = SessionAttributes::new();
        reply(&skill, menu_for("2025-09-08"), &mut attrs).await;
        assert!(DialogSession::load(&attrs).is_some());

        reply(&skill, menu_for("2025-09-13"), &mut attrs).await;
        assert!(DialogSession::load(&attrs).is_none());
    }

    #[tokio::test]
    async fn no_entrees_is_reported_but_dialog_continues() {
        let day = json!([[], [entries(&["Chili"])]]);
        let week = json!([[], day, day, day, day, day, []]);
        let bytes = serde_json::to_vec(&json!({
            "menuList": [{}, {"menuFirstDate": ANCHOR_SECS}],
            "menu": {"menu": {"items": [[], week]}}
        }))
        .unwrap();
        let skill = skill_with(StaticFeedSource::new(bytes), "2025-09-01");
        let mut attrs = SessionAttributes::new();

        let resp = reply(&skill, intent("GetMenuIntent"), &mut attrs).await;
        assert!(resp.speech.text().contains("No entrees were found for Monday September 1 2025"));
        assert!(!resp.should_end_session);
        assert_eq!(
            DialogSession::load(&attrs).unwrap().stage(),
            disclosure::Stage::Revealed(Category::Entrees)
        );

        let soups = reply(&skill, intent("AMAZON.MoreIntent"), &mut attrs).await;
        assert!(soups.speech.text().contains("Chili"));
    }

    #[tokio::test]
    async fn pagination_does_not_refetch() {
        let source = Arc::new(StaticFeedSource::new(feed_bytes()));
        let skill = LunchSkill::new(source.clone(), Arc::new(FixedClock(date("2025-09-08"))));
        let mut attrs = SessionAttributes::new();

        reply(&skill, menu_for("2025-09-08"), &mut attrs).await;
        reply(&skill, intent("AMAZON.YesIntent"), &mut attrs).await;
        reply(&skill, intent("AMAZON.YesIntent"), &mut attrs).await;
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn help_stop_and_cancel() {
        let skill = skill();
        let mut attrs = SessionAttributes::new();

        let help = reply(&skill, intent("AMAZON.HelpIntent"), &mut attrs).await;
        assert!(help.speech.text().contains("Sage Dining is serving at Stone Ridge"));
        assert_eq!(
            help.reprompt,
            Some(OutputSpeech::PlainText(ASK_DAY.into()))
        );

        reply(&skill, menu_for("2025-09-08"), &mut attrs).await;
        let stop = reply(&skill, intent("AMAZON.StopIntent"), &mut attrs).await;
        assert_eq!(stop.speech, OutputSpeech::PlainText("Goodbye".into()));
        assert!(stop.should_end_session);
        assert!(DialogSession::load(&attrs).is_none());

        let cancel = reply(&skill, intent("AMAZON.CancelIntent"), &mut attrs).await;
        assert!(cancel.should_end_session);
    }

    #[tokio::test]
    async fn unknown_intent_is_an_error() {
        let mut attrs = SessionAttributes::new();
        let err = skill()
            .handle(&intent("OrderPizzaIntent"), &mut attrs)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("OrderPizzaIntent"));
    }

    #[tokio::test]
    async fn session_end_clears_attributes() {
        let skill = skill();
        let mut attrs = SessionAttributes::new();
        reply(&skill, menu_for("2025-09-08"), &mut attrs).await;

        let end = SkillRequest::new(SessionId::from("s1"), RequestKind::SessionEnded);
        assert!(skill.handle(&end, &mut attrs).await.unwrap().is_none());
        assert!(attrs.is_empty());
    }

    #[tokio::test]
    async fn custom_wording() {
        let wording = Wording {
            skill_name: "Oak Hill Lunch".into(),
            school_name: "Oak Hill".into(),
            provider_name: "Campus Foods".into(),
        };
        let skill = skill_with(StaticFeedSource::new(Vec::new()), "2025-09-08").with_wording(wording);
        let mut attrs = SessionAttributes::new();
        let resp = reply(&skill, intent("GetMenuIntent"), &mut attrs).await;
        assert!(resp.speech.text().contains("Campus Foods"));
    }
}
