//! Rebuilding filters from stored actions.

use filmneg_core::FilterAction;
use filmneg_ops::{ColorBalanceFilter, ImageFilter, InvertFilter, LevelsFilter};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::filter::FilmFilter;
use crate::{FilmError, FilmResult};

/// Identifiers of every filter that can be replayed.
pub const REPLAYABLE: [&str; 4] = [
    FilmFilter::IDENTIFIER,
    LevelsFilter::IDENTIFIER,
    ColorBalanceFilter::IDENTIFIER,
    InvertFilter::IDENTIFIER,
];

/// Builds the filter an action describes.
///
/// # Errors
///
/// Returns [`FilmError::UnknownAction`] for an identifier no filter owns.
pub fn filter_from_action(action: &FilterAction) -> FilmResult<Box<dyn ImageFilter>> {
    debug!(identifier = %action.identifier, version = action.version, "Replaying action");
    let filter: Box<dyn ImageFilter> = match action.identifier.as_str() {
        FilmFilter::IDENTIFIER => Box::new(FilmFilter::from_action(action)?),
        LevelsFilter::IDENTIFIER => Box::new(LevelsFilter::from_action(action)?),
        ColorBalanceFilter::IDENTIFIER => Box::new(ColorBalanceFilter::from_action(action)?),
        InvertFilter::IDENTIFIER => Box::new(InvertFilter::from_action(action)?),
        other => return Err(FilmError::UnknownAction(other.to_string())),
    };
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::FilmContainer;

    #[test]
    fn test_every_filter_replays() {
        let actions = [
            FilmFilter::new(FilmContainer::default()).filter_action(),
            InvertFilter.filter_action(),
            ColorBalanceFilter::new(Default::default()).filter_action(),
        ];
        for action in &actions {
            let filter = filter_from_action(action).unwrap();
            assert_eq!(filter.filter_action(), *action);
        }
    }

    #[test]
    fn test_unknown_identifier() {
        let err = filter_from_action(&FilterAction::new("digikam:Sharpen", 1)).err().unwrap();
        assert!(matches!(err, FilmError::UnknownAction(_)));
    }
}
