use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::TeacherId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Classes::ClassCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Classes::ClassName).string().not_null())
                    .col(ColumnDef::new(Classes::Description).text().null())
                    .col(
                        ColumnDef::new(Classes::StudentCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建签到链接表
        manager
            .create_table(
                Table::create()
                    .table(AttendanceLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceLinks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceLinks::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceLinks::ClassCode)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceLinks::ClassName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceLinks::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AttendanceLinks::Link).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceLinks::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceLinks::ExpiresAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceLinks::UsageCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttendanceLinks::MaxUsage)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建签到记录表
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::LinkId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::ClassCode)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::ClassName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Status).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecords::VerificationMethod)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::MarkedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::LinkId)
                            .to(AttendanceLinks::Table, AttendanceLinks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 班级表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_teacher_id")
                    .table(Classes::Table)
                    .col(Classes::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_class_code")
                    .table(Classes::Table)
                    .col(Classes::ClassCode)
                    .to_owned(),
            )
            .await?;

        // 签到链接表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_links_token")
                    .table(AttendanceLinks::Table)
                    .col(AttendanceLinks::Token)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_links_teacher_id")
                    .table(AttendanceLinks::Table)
                    .col(AttendanceLinks::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_links_expires_at")
                    .table(AttendanceLinks::Table)
                    .col(AttendanceLinks::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        // 签到记录表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_link_id")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::LinkId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_class_code")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::ClassCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_marked_at")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::MarkedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    TeacherId,
    ClassCode,
    ClassName,
    Description,
    StudentCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceLinks {
    #[sea_orm(iden = "attendance_links")]
    Table,
    Id,
    TeacherId,
    ClassCode,
    ClassName,
    Token,
    Link,
    CreatedAt,
    ExpiresAt,
    UsageCount,
    MaxUsage,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    #[sea_orm(iden = "attendance_records")]
    Table,
    Id,
    LinkId,
    ClassCode,
    ClassName,
    StudentId,
    StudentName,
    Status,
    VerificationMethod,
    MarkedAt,
}
