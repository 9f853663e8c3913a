use std::time::Instant;

use tracing::debug;

use crate::{store::RecordStore, Result};

use super::{predicate, Query};

/// Scans the store and returns an iterator over the identifiers of all
/// records matching the given query, in store iteration order. The scan
/// stays open until the iterator is dropped.
pub fn search<'a, S: RecordStore>(
    query: &'a Query,
    store: &'a S,
) -> Result<impl Iterator<Item = Result<String>> + 'a> {
    debug!(?query, "scanning record store");
    Ok(store.all()?.filter_map(move |record| match record {
        Ok(record) if predicate::matches(query, &record) => Some(Ok(record.into_id())),
        Ok(_) => None,
        Err(err) => Some(Err(err)),
    }))
}

/// Executes the query against the store and collects the identifiers of all
/// matching records in store iteration order
pub fn execute<S: RecordStore>(query: &Query, store: &S) -> Result<Vec<String>> {
    let start = Instant::now();
    let ids = search(query, store)?.collect::<Result<Vec<_>>>()?;
    debug!(
        matches = ids.len(),
        elapsed = ?start.elapsed(),
        "query executed"
    );
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion, VecAssertion};
    use pretty_assertions::assert_eq;

    use super::{execute, search};
    use crate::{
        geometry::{Distance, DistanceUnit, Envelope, Point, ShapeRelation},
        ingest::Ingester,
        query::{and, gte, lte, not, or, Query},
        record::Record,
        store::{MemoryStore, RecordStore},
        Result,
    };

    fn p(lat: f64, lon: f64) -> Point {
        Point::new(lat, lon).unwrap()
    }

    fn wonders() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .put(
                Record::new("pyramids")
                    .with_location(p(29.976480, 31.131302))
                    .with_attribute("name", "Pyramids of Giza"),
            )
            .unwrap();
        store
            .put(
                Record::new("kutch")
                    .with_location(p(23.733732, 69.859741))
                    .with_attribute("name", "The Great Rann of Kutch"),
            )
            .unwrap();
        store
            .put(
                Record::new("agra")
                    .with_region(Envelope::from_bounds(30.2, 75.0, 25.0, 80.1).unwrap())
                    .with_attribute("name", "Agra"),
            )
            .unwrap();
        store
            .put(
                Record::new("lighthouse")
                    .with_location(p(29.976480, 31.131302))
                    .with_attribute("name", "Lighthouse of alexandria"),
            )
            .unwrap();
        store
    }

    fn people() -> MemoryStore {
        let store = MemoryStore::new();
        for (id, age, name) in [
            ("john", 10, "John Doe"),
            ("janette", 25, "Janette Doe"),
            ("johan", 20, "Johan Doe"),
            ("test", 10, "Test"),
        ] {
            store
                .put(
                    Record::new(id)
                        .with_location(p(48.137154, 11.576124))
                        .with_attribute("age", age)
                        .with_attribute("fullName", name),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn bounding_box() {
        let store = wonders();
        let ids = execute(&Query::bounding_box(31.0, 30.0, 28.0, 32.0).unwrap(), &store).unwrap();
        assert_eq!(ids, vec!["pyramids".to_string(), "lighthouse".to_string()]);
    }

    #[test]
    fn distance() {
        let store = wonders();
        let ids = execute(
            &Query::distance(
                p(29.976, 31.131),
                Distance::new(10.0, DistanceUnit::Miles).unwrap(),
            ),
            &store,
        )
        .unwrap();
        assert_that!(ids).contains("lighthouse".to_string());
        assert!(!ids.contains(&"kutch".to_string()));
    }

    #[test]
    fn polygon() {
        let store = wonders();
        let ids = execute(
            &Query::polygon([p(22.733, 68.859), p(24.733, 68.859), p(23.0, 70.859)]).unwrap(),
            &store,
        )
        .unwrap();
        assert_eq!(ids, vec!["kutch".to_string()]);
    }

    #[test]
    fn envelope_within() {
        let store = wonders();
        let query = Query::shape(
            Envelope::new(p(31.2, 74.0), p(24.0, 81.1)).unwrap(),
            ShapeRelation::Within,
        );
        let ids = execute(&query, &store).unwrap();
        assert_eq!(ids, vec!["agra".to_string()]);
    }

    #[test]
    fn nothing_matches() {
        let store = wonders();
        let ids = execute(&Query::bounding_box(10.0, 0.0, 0.0, 10.0).unwrap(), &store).unwrap();
        assert_that!(ids).is_empty();

        let empty = MemoryStore::new();
        assert_that!(execute(&Query::All, &empty).unwrap()).is_empty();
    }

    #[test]
    fn deleted_records_are_not_returned() {
        let store = wonders();
        assert_that!(execute(&Query::All, &store).unwrap()).has_length(4);

        store.delete("pyramids").unwrap();
        let ids = execute(&Query::All, &store).unwrap();
        assert_eq!(
            ids,
            vec![
                "kutch".to_string(),
                "agra".to_string(),
                "lighthouse".to_string()
            ]
        );
        let ids = execute(&Query::bounding_box(31.0, 30.0, 28.0, 32.0).unwrap(), &store).unwrap();
        assert_that!(ids).is_equal_to(vec!["lighthouse".to_string()]);
    }

    #[test]
    fn range() {
        let store = people();
        let ids = execute(&and![gte!["age", 5], lte!["age", 15]], &store).unwrap();
        assert_eq!(ids, vec!["john".to_string(), "test".to_string()]);
    }

    #[test]
    fn range_over_ingested_documents() {
        let ingester = Ingester::default();
        let store = MemoryStore::new();
        for (id, payload) in [
            (
                "john",
                r#"{"age":20,"dateOfBirth":1471466076564,"fullName":"John Doe"}"#,
            ),
            (
                "johan",
                r#"{"age":10,"dateOfBirth":1471455886564,"fullName":"Johan Doe"}"#,
            ),
            ("test", r#"{"fullName":"Test","salary":"11500","age":"10"}"#),
        ] {
            let document = serde_json::from_str(payload).unwrap();
            let record = ingester
                .ingest_with_id(id, &document)
                .unwrap()
                .with_location(p(48.137154, 11.576124));
            store.put(record).unwrap();
        }

        let expected = vec!["johan".to_string(), "test".to_string()];
        let ids = execute(&and![gte!["age", 5], lte!["age", 15]], &store).unwrap();
        assert_eq!(ids, expected);
        let ids = execute(&and![gte!["age", 5.0], lte!["age", 15.0]], &store).unwrap();
        assert_eq!(ids, expected);
        let ids = execute(&and![gte!["age", 5.5], lte!["age", 15]], &store).unwrap();
        assert_eq!(ids, expected);

        let ids = execute(&gte!["salary", 10000], &store).unwrap();
        assert_eq!(ids, vec!["test".to_string()]);
    }

    #[test]
    fn text() {
        let store = people();
        let ids = execute(&Query::text("doe"), &store).unwrap();
        assert_that!(ids).has_length(3);

        // +John -Doe OR Janette
        let ids = execute(
            &or![
                and![Query::text("john"), not![Query::text("doe")]],
                Query::text("janette")
            ],
            &store,
        )
        .unwrap();
        assert_eq!(ids, vec!["janette".to_string()]);
    }

    #[test]
    fn lazy_search() {
        let store = wonders();
        let query = Query::All;
        let mut it = search(&query, &store).unwrap();
        assert_eq!(it.next().unwrap().unwrap(), "pyramids");
        drop(it);

        // the scan released the store
        store.delete("agra").unwrap();
        let ids = search(&query, &store)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_that!(ids).has_length(3);
    }
}
