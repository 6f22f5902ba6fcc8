use crate::parser::{ParsedAutomaton, ParsedEdge};
use nom::bytes::complete::take_till1;
use nom::character::complete::{digit1, multispace0, multispace1};
use nom::combinator::{map, map_res};
use nom::multi::{count, many0};
use nom::sequence::{preceded, tuple};
use nom::IResult;

pub(crate) fn full_automaton(input: &str) -> IResult<&str, ParsedAutomaton> {
    let (input, vertices) = preceded(multispace0, number)(input)?;
    let (input, edge_count) = preceded(multispace1, number)(input)?;
    let (input, edges) = count(preceded(multispace1, edge), edge_count)(input)?;
    let (input, terminals) = many0(preceded(multispace1, number))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((
        input,
        ParsedAutomaton {
            vertices,
            edges,
            terminals,
        },
    ))
}

fn edge(input: &str) -> IResult<&str, ParsedEdge> {
    map(
        tuple((
            number,
            preceded(multispace1, number),
            preceded(multispace1, label),
        )),
        |(from, to, label)| ParsedEdge { from, to, label },
    )(input)
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn label(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}
