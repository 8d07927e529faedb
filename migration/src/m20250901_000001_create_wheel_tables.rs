use sea_orm_migration::prelude::*;

/// Prizes (转盘奖品配置表)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    DisplayKey,
    Name,
    Image,
    Kind,
    Remaining,
    IsActive,
    Weight,
    CreatedAt,
    UpdatedAt,
}

/// Spin Records (转盘抽奖历史)
#[derive(DeriveIden)]
enum SpinRecords {
    Table,
    Id,
    PrizeId,
    PrizeName,
    StockAfter,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 字段说明:
/// - display_key: 稳定的转盘顺序键, 与存储自增 id 无关, 重新播种后保持不变
/// - kind: 'prize' | 'consolation' (谢谢参与类不扣库存、不写历史)
/// - weight: 选择权重 (按百分比约定, 不强制合计 100)
/// - remaining: 剩余库存, 0 表示已抽完但仍在转盘上展示
///
/// 时间戳由应用代码写入 (SQLite 下不依赖数据库默认值)。
/// spin_records 不建奖品外键: 历史记录冗余存储奖品名,
/// 奖品被清除/重置后历史必须仍然可回溯。
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::DisplayKey).integer().not_null())
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Prizes::Image)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Prizes::Kind)
                            .string_len(16)
                            .not_null()
                            .default("prize"),
                    )
                    .col(
                        ColumnDef::new(Prizes::Remaining)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Prizes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Prizes::Weight)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // display_key 唯一 (配置播种按它对账)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_display_key_unique")
                    .table(Prizes::Table)
                    .col(Prizes::DisplayKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 抽奖历史表
        manager
            .create_table(
                Table::create()
                    .table(SpinRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpinRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::PrizeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::PrizeName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::StockAfter)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SpinRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖品维度查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spin_records_prize")
                    .table(SpinRecords::Table)
                    .col(SpinRecords::PrizeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序: 历史 -> 奖品
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(SpinRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        Ok(())
    }
}
