use chrono::{DateTime, Utc};
use nw_core::{Article, IntervalBucket, IntervalGroups, IntervalUnit};

/// Partition `articles` into labeled time windows of `interval_value`
/// units, newest window first.
///
/// Windows are carved backward from now (or from the newest article, if it
/// is somehow in the future), and the earliest window's start is clamped
/// to the oldest timestamp. Articles without a timestamp are dropped;
/// windows with no articles are omitted.
pub fn group_articles(
    articles: &[Article],
    interval_value: u32,
    interval_unit: IntervalUnit,
) -> IntervalGroups {
    group_articles_at(Utc::now(), articles, interval_value, interval_unit)
}

/// Same as [`group_articles`] with an explicit clock.
pub fn group_articles_at(
    now: DateTime<Utc>,
    articles: &[Article],
    interval_value: u32,
    interval_unit: IntervalUnit,
) -> IntervalGroups {
    let mut dated: Vec<(DateTime<Utc>, &Article)> = articles
        .iter()
        .filter_map(|article| article.published_at.map(|at| (at, article)))
        .collect();

    let mut groups = IntervalGroups::new();
    // Zero-width windows cannot be carved; validation rejects this
    // upstream, but the walk below must not spin on it.
    if dated.is_empty() || interval_value == 0 {
        return groups;
    }

    dated.sort_by(|a, b| b.0.cmp(&a.0));
    let newest = dated[0].0;
    let oldest = dated[dated.len() - 1].0;

    let mut end = now.max(newest);
    let mut newest_window = true;
    loop {
        let mut start = interval_unit.window_start(end, interval_value);
        if start < oldest {
            start = oldest;
        }

        let members: Vec<Article> = dated
            .iter()
            .filter(|(at, _)| in_window(*at, start, end, newest_window))
            .map(|(_, article)| (*article).clone())
            .collect();

        if !members.is_empty() {
            groups.insert(IntervalBucket {
                interval_label: interval_unit.label(start, end),
                start_time: start,
                end_time: end,
                count: members.len(),
                articles: members,
            });
        }

        if start <= oldest {
            break;
        }
        end = start;
        newest_window = false;
    }

    groups
}

/// Half-open window membership: `[start, end)`, except the newest window
/// which also accepts its end so an article published exactly at the walk
/// origin is kept. An article sitting on a boundary shared by two windows
/// therefore lands in the newer one only.
fn in_window(at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>, newest: bool) -> bool {
    at >= start && (at < end || (newest && at == end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use nw_core::Source;

    fn article(url: &str, published_at: Option<DateTime<Utc>>) -> Article {
        Article {
            title: format!("Article {}", url),
            description: None,
            content: None,
            url: url.to_string(),
            url_to_image: None,
            published_at,
            source: Source::default(),
            author: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let groups = group_articles_at(now(), &[], 6, IntervalUnit::Hours);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_null_timestamps_are_dropped() {
        let articles = vec![
            article("https://example.com/1", None),
            article("https://example.com/2", None),
        ];
        let groups = group_articles_at(now(), &articles, 6, IntervalUnit::Hours);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_six_hour_windows_scenario() {
        let now = now();
        let articles = vec![
            article("https://example.com/1", Some(now - Duration::hours(1))),
            article("https://example.com/2", Some(now - Duration::hours(3))),
            article("https://example.com/3", Some(now - Duration::hours(8))),
            article("https://example.com/4", Some(now - Duration::hours(15))),
        ];
        let groups = group_articles_at(now, &articles, 6, IntervalUnit::Hours);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups.total_count(), 4);

        let buckets: Vec<_> = groups.iter().collect();
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].end_time, now);
        assert_eq!(buckets[0].start_time, now - Duration::hours(6));
        assert_eq!(buckets[1].count, 1);
        assert_eq!(buckets[1].start_time, now - Duration::hours(12));
        assert_eq!(buckets[2].count, 1);
        // Earliest window is clamped to the oldest article.
        assert_eq!(buckets[2].start_time, now - Duration::hours(15));
    }

    #[test]
    fn test_completeness_over_sparse_history() {
        let now = now();
        let offsets_hours = [0, 1, 5, 6, 7, 23, 24, 48, 49, 120];
        let articles: Vec<Article> = offsets_hours
            .iter()
            .enumerate()
            .map(|(i, h)| {
                article(
                    &format!("https://example.com/{}", i),
                    Some(now - Duration::hours(*h)),
                )
            })
            .collect();

        let groups = group_articles_at(now, &articles, 6, IntervalUnit::Hours);
        assert_eq!(groups.total_count(), articles.len());
    }

    #[test]
    fn test_boundary_article_counted_once() {
        let now = now();
        // Exactly on the edge between the first and second window.
        let boundary = now - Duration::hours(6);
        let articles = vec![
            article("https://example.com/edge", Some(boundary)),
            article("https://example.com/old", Some(now - Duration::hours(10))),
        ];
        let groups = group_articles_at(now, &articles, 6, IntervalUnit::Hours);

        assert_eq!(groups.total_count(), 2);
        let buckets: Vec<_> = groups.iter().collect();
        // The shared boundary belongs to the newer window.
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].articles[0].url, "https://example.com/edge");
    }

    #[test]
    fn test_article_published_exactly_now_is_kept() {
        let now = now();
        let articles = vec![
            article("https://example.com/live", Some(now)),
            article("https://example.com/older", Some(now - Duration::hours(2))),
        ];
        let groups = group_articles_at(now, &articles, 6, IntervalUnit::Hours);
        assert_eq!(groups.total_count(), 2);
    }

    #[test]
    fn test_single_article_yields_single_bucket() {
        let now = now();
        let articles = vec![article("https://example.com/1", Some(now - Duration::hours(2)))];
        let groups = group_articles_at(now, &articles, 6, IntervalUnit::Hours);
        assert_eq!(groups.len(), 1);
        let bucket = groups.iter().next().unwrap();
        assert_eq!(bucket.count, 1);
        // Clamped to the only timestamp available.
        assert_eq!(bucket.start_time, now - Duration::hours(2));
    }

    #[test]
    fn test_windows_are_monotonically_older() {
        let now = now();
        let articles: Vec<Article> = (0..40)
            .map(|i| {
                article(
                    &format!("https://example.com/{}", i),
                    Some(now - Duration::hours(i * 3)),
                )
            })
            .collect();
        let groups = group_articles_at(now, &articles, 6, IntervalUnit::Hours);

        let buckets: Vec<_> = groups.iter().collect();
        assert!(buckets.len() > 1);
        for pair in buckets.windows(2) {
            assert!(pair[0].start_time >= pair[1].end_time);
            assert!(pair[1].start_time < pair[1].end_time);
        }
        for bucket in &buckets {
            assert!(bucket.start_time < bucket.end_time);
            assert_eq!(bucket.count, bucket.articles.len());
        }
    }

    #[test]
    fn test_label_matches_unit_format() {
        let now = now();
        let articles = vec![article("https://example.com/1", Some(now - Duration::hours(3)))];
        let groups = group_articles_at(now, &articles, 6, IntervalUnit::Hours);
        let bucket = groups.iter().next().unwrap();
        // Clamped window spans 3 hours, so the label says 3, not 6.
        assert_eq!(bucket.interval_label, "Last 3 hours (Jan 15 07:30 - 10:30)");
        assert!(groups.get(&bucket.interval_label).is_some());
    }

    #[test]
    fn test_huge_interval_value_yields_one_clamped_bucket() {
        let now = now();
        let articles = vec![
            article("https://example.com/1", Some(now - Duration::hours(1))),
            article("https://example.com/2", Some(now - Duration::hours(40))),
        ];
        // Far outside chrono's range; the window start saturates and is
        // then clamped to the oldest article instead of panicking.
        let groups = group_articles_at(now, &articles, 4_000_000_000, IntervalUnit::Hours);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.total_count(), 2);
        let bucket = groups.iter().next().unwrap();
        assert_eq!(bucket.start_time, now - Duration::hours(40));
        assert_eq!(bucket.end_time, now);
    }

    #[test]
    fn test_monthly_grouping_is_calendar_aware() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let articles = vec![
            article("https://example.com/recent", Some(now - Duration::days(10))),
            article("https://example.com/old", Some(now - Duration::days(45))),
        ];
        let groups = group_articles_at(now, &articles, 1, IntervalUnit::Months);

        assert_eq!(groups.total_count(), 2);
        let buckets: Vec<_> = groups.iter().collect();
        // One month back from March 31 lands on February 29 (leap year).
        assert_eq!(
            buckets[0].start_time,
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
        );
    }
}
