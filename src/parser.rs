//! 选择查询的语法分析器
//!
//! ## 解析流程
//!
//! ```text
//! parse_query(input)
//!   ├─ Lexer: 按 " or " 切分子句（引号内的 or 不切分）
//!   └─ Parser::parse()
//!        └─ 对每个子句 split_conditions(): 按 " and " 切分（不识别引号）
//!             └─ parse_condition()
//!                  ├─ kind: / group: / tag: / owner: / table_name: / column: / column_tag:
//!                  │    → 去掉前缀、去掉引号 → Membership
//!                  ├─ key: （不含 "+key:" 和 "key:+"）→ 通配符 Key
//!                  │    └─ 以 "+" 结尾（key:"a.b"+）→ DownstreamKey
//!                  ├─ 含 "+key:" → UpstreamKey（前缀之后的值）
//!                  ├─ 含 "key:+" → DownstreamKey（标记之前的值）
//!                  └─ 其他 → Unrecognized（总是匹配）
//! ```
//!
//! 解析永远不会失败：无法识别的写法都会落到 `Unrecognized`。
//!
//! ## 示例
//!
//! ```text
//! kind:"dbt"
//! kind:"dbt" and group:"core"
//! kind:"dbt" or kind:"spark"
//! key:"sales_*"
//! +key:"raw.orders"
//! ```

use crate::ast::{AndGroup, Condition, Field, SelectionQuery};
use crate::lexer::{split_conditions, Lexer};
use crate::pattern::KeyPattern;
use crate::token::Clause;

const KEY_PREFIX: &str = "key:";
const UPSTREAM_MARKER: &str = "+key:";
const DOWNSTREAM_MARKER: &str = "key:+";

pub struct Parser<'a> {
    clauses: &'a [Clause<'a>],
}

impl<'a> Parser<'a> {
    pub fn new(clauses: &'a [Clause<'a>]) -> Self {
        Self { clauses }
    }

    pub fn parse(&self) -> SelectionQuery {
        let clauses = self
            .clauses
            .iter()
            .map(|clause| AndGroup {
                conditions: split_conditions(clause.text)
                    .into_iter()
                    .map(parse_condition)
                    .collect(),
            })
            .collect();
        SelectionQuery { clauses }
    }
}

/// 解析完整的查询字符串
pub fn parse_query(input: &str) -> SelectionQuery {
    let clauses: Vec<_> = Lexer::new(input.trim()).collect();
    Parser::new(&clauses).parse()
}

/// 解析单个原子条件
pub fn parse_condition(text: &str) -> Condition {
    let text = text.trim();

    for field in Field::ALL {
        if let Some(rest) = text.strip_prefix(field.prefix()) {
            return Condition::Membership { field, value: unquote(rest).to_string() };
        }
    }

    let dependency_form = text.contains(UPSTREAM_MARKER) || text.contains(DOWNSTREAM_MARKER);

    if !dependency_form {
        if let Some(rest) = text.strip_prefix(KEY_PREFIX) {
            // key:"a.b"+ 是 key:+ 的另一种写法
            if let Some(value) = rest.trim_end().strip_suffix('+') {
                return Condition::DownstreamKey(unquote(value).to_string());
            }
            return Condition::Key(KeyPattern::new(unquote(rest)));
        }
    }

    if let Some((_, after)) = text.split_once(UPSTREAM_MARKER) {
        return Condition::UpstreamKey(unquote(after).to_string());
    }

    if let Some((before, _)) = text.split_once(DOWNSTREAM_MARKER) {
        return Condition::DownstreamKey(unquote(before).to_string());
    }

    Condition::Unrecognized(text.to_string())
}

/// 去掉首尾空白和引号，不成对的引号也一并去掉
fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}
