use std::io::Cursor;

use super::common::*;

use crate::workflows::screening::{read_candidates, RecommendationTier};

#[test]
fn imported_rows_score_like_hand_built_candidates() {
    let csv = "name,language,level,years,format,salary\n\
               Senior Backend,\"Java, C++\",senior,9,\"удалённый, очно, гибридный\",200000\n\
               Newcomer,,,,,\n";
    let candidates = read_candidates(Cursor::new(csv)).expect("csv parses");
    let scorer = scorer();

    let imported = scorer.score(&candidates[0], None);
    let built = scorer.score(&senior_backend(), None);
    assert_eq!(imported.final_score, built.final_score);

    let newcomer = scorer.score(&candidates[1], None);
    assert_eq!(newcomer.recommendation_tier, RecommendationTier::Low);
}
