//! 选择查询（querySelection）的解析结果

use std::fmt;

use crate::pattern::KeyPattern;

/// 查询的根节点：若干 OR 子句，任一子句成立即匹配
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionQuery {
    /// 为空表示匹配所有资产
    pub clauses: Vec<AndGroup>,
}

impl SelectionQuery {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// 一个 AND 组：所有条件都成立才匹配
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AndGroup {
    pub conditions: Vec<Condition>,
}

/// 按成员关系判断的元数据字段, 例如：`kind:"dbt"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Kind,
    Group,
    Tag,
    Owner,
    TableName,
    Column,
    ColumnTag,
}

impl Field {
    /// 匹配顺序，先匹配到的前缀优先
    pub const ALL: [Field; 7] = [
        Field::Kind,
        Field::Group,
        Field::Tag,
        Field::Owner,
        Field::TableName,
        Field::Column,
        Field::ColumnTag,
    ];

    /// 查询中使用的前缀，包含冒号
    pub fn prefix(self) -> &'static str {
        match self {
            Field::Kind => "kind:",
            Field::Group => "group:",
            Field::Tag => "tag:",
            Field::Owner => "owner:",
            Field::TableName => "table_name:",
            Field::Column => "column:",
            Field::ColumnTag => "column_tag:",
        }
    }
}

/// 单个原子条件
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// 字段成员检查
    Membership { field: Field, value: String },
    /// `key:` 通配符匹配
    Key(KeyPattern),
    /// `+key:`：占位实现，只做资产键的精确比较，不遍历上游依赖
    UpstreamKey(String),
    /// `key:+`：占位实现，只做资产键的精确比较，不遍历下游依赖
    DownstreamKey(String),
    /// 无法识别的条件，总是视为匹配
    Unrecognized(String),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Membership { field, value } => write!(f, "{}{:?}", field.prefix(), value),
            Condition::Key(pattern) => write!(f, "key:{:?}", pattern.source()),
            Condition::UpstreamKey(key) => write!(f, "+key:{:?}", key),
            Condition::DownstreamKey(key) => write!(f, "key:{:?}+", key),
            Condition::Unrecognized(text) => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for AndGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{}", condition)?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
