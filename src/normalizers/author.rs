use super::{clean_text, Field};

/// Author name(s). Person/Organization objects contribute their `name`;
/// several authors are joined with ", ".
pub fn parse_author(field: Field) -> String {
    match field {
        Field::List(authors) => authors
            .iter()
            .map(|author| parse_author(Field::from(author)))
            .filter(|name| !name.is_empty())
            .collect::<Vec<String>>()
            .join(", "),
        Field::Object(author) => clean_text(Field::from(author.get("name"))),
        Field::Scalar(_) | Field::Absent => clean_text(field),
    }
}
