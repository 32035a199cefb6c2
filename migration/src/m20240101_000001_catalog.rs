use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Users { Table, Id, Name, PasswordHash, IsAdmin, CreatedAt }

#[derive(DeriveIden)]
enum Departments { Table, Id, Name }

#[derive(DeriveIden)]
enum Professions { Table, Id, Name }

#[derive(DeriveIden)]
enum DepartmentProfessions { Table, DepartmentId, ProfessionId }

#[derive(DeriveIden)]
enum Employees { Table, Id, Name, Salary, DepartmentId, ProfessionId }

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Users::Table)
                .if_not_exists()
                .col(ColumnDef::new(Users::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Users::Name).string_len(128).not_null().unique_key())
                .col(ColumnDef::new(Users::PasswordHash).string_len(256).not_null())
                .col(ColumnDef::new(Users::IsAdmin).boolean().not_null().default(false))
                .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned()
        ).await?;

        manager.create_table(
            Table::create()
                .table(Departments::Table)
                .if_not_exists()
                .col(ColumnDef::new(Departments::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Departments::Name).string_len(128).not_null())
                .to_owned()
        ).await?;

        manager.create_table(
            Table::create()
                .table(Professions::Table)
                .if_not_exists()
                .col(ColumnDef::new(Professions::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Professions::Name).string_len(128).not_null())
                .to_owned()
        ).await?;

        manager.create_table(
            Table::create()
                .table(DepartmentProfessions::Table)
                .if_not_exists()
                .col(ColumnDef::new(DepartmentProfessions::DepartmentId).integer().not_null())
                .col(ColumnDef::new(DepartmentProfessions::ProfessionId).integer().not_null())
                .primary_key(
                    Index::create()
                        .col(DepartmentProfessions::DepartmentId)
                        .col(DepartmentProfessions::ProfessionId)
                )
                .foreign_key(ForeignKey::create()
                    .name("fk_department_professions_department")
                    .from(DepartmentProfessions::Table, DepartmentProfessions::DepartmentId)
                    .to(Departments::Table, Departments::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(ForeignKey::create()
                    .name("fk_department_professions_profession")
                    .from(DepartmentProfessions::Table, DepartmentProfessions::ProfessionId)
                    .to(Professions::Table, Professions::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_table(
            Table::create()
                .table(Employees::Table)
                .if_not_exists()
                .col(ColumnDef::new(Employees::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Employees::Name).string_len(256).not_null())
                .col(ColumnDef::new(Employees::Salary).big_integer().not_null().default(0))
                .col(ColumnDef::new(Employees::DepartmentId).integer().not_null())
                .col(ColumnDef::new(Employees::ProfessionId).integer().not_null())
                .foreign_key(ForeignKey::create()
                    .name("fk_employees_department")
                    .from(Employees::Table, Employees::DepartmentId)
                    .to(Departments::Table, Departments::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                )
                .foreign_key(ForeignKey::create()
                    .name("fk_employees_profession")
                    .from(Employees::Table, Employees::ProfessionId)
                    .to(Professions::Table, Professions::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create().name("idx_employees_name").table(Employees::Table).col(Employees::Name).to_owned()
        ).await?;

        manager.create_index(
            Index::create().name("idx_employees_department").table(Employees::Table).col(Employees::DepartmentId).to_owned()
        ).await?;

        manager.create_index(
            Index::create().name("idx_employees_profession").table(Employees::Table).col(Employees::ProfessionId).to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employees::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(DepartmentProfessions::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Professions::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Departments::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        Ok(())
    }
}
